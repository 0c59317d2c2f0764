// src/middleware/auth.rs

use axum::{
    extract::{Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{Role, SessionUser},
    services::session::SESSION_COOKIE,
};

// O middleware de autenticação: resolve o cookie de sessão no store
// server-side e injeta o usuário nos "extensions" da requisição.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session_id = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
        .ok_or(AppError::NotAuthenticated)?;

    let user = app_state
        .sessions
        .get(session_id)
        .await
        .ok_or(AppError::NotAuthenticated)?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

// Guarda de papel: só deixa passar super admins. Deve ficar por dentro
// do auth_guard (que já populou os extensions).
pub async fn super_admin_guard(request: Request, next: Next) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<SessionUser>()
        .ok_or(AppError::NotAuthenticated)?;

    if user.role != Role::SuperAdmin {
        return Err(AppError::SuperAdminRequired);
    }
    Ok(next.run(request).await)
}

// Extrator para obter o usuário da sessão diretamente nos handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedSession(pub SessionUser);

impl AuthenticatedSession {
    /// O tenant da sessão. Super admins não têm tenant e não operam
    /// sobre os dados de domínio.
    pub fn tenant_id(&self) -> Result<Uuid, AppError> {
        self.0.tenant_id.ok_or(AppError::TenantRequired)
    }
}

impl<S> axum::extract::FromRequestParts<S> for AuthenticatedSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionUser>()
            .cloned()
            .map(AuthenticatedSession)
            .ok_or(AppError::NotAuthenticated)
    }
}
