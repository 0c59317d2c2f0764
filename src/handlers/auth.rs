// src/handlers/auth.rs

use axum::{Json, extract::State};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{LoginPayload, LoginResponse, LogoutResponse, SessionResponse},
    services::session::SESSION_COOKIE,
};

// POST /api/login
#[utoipa::path(
    post,
    path = "/api/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Login effettuato", body = LoginResponse),
        (status = 400, description = "Username o password mancanti"),
        (status = 401, description = "Credenziali non valide")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginPayload>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let user = app_state
        .auth_service
        .login(
            &payload.username,
            &payload.password,
            payload.tenant_name.as_deref(),
        )
        .await?;

    tracing::info!("🔑 Login riuscito per '{}'", user.username);

    let session_id = app_state.sessions.insert(user.clone()).await;
    let cookie = Cookie::build((SESSION_COOKIE, session_id.to_string()))
        .path("/")
        .http_only(true)
        .build();

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            success: true,
            user,
        }),
    ))
}

// POST /api/logout
#[utoipa::path(
    post,
    path = "/api/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Sessione distrutta", body = LogoutResponse)
    )
)]
pub async fn logout(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<LogoutResponse>), AppError> {
    if let Some(session_id) = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
    {
        app_state.sessions.remove(session_id).await;
    }

    let removal = Cookie::build(SESSION_COOKIE).path("/");
    Ok((jar.remove(removal), Json(LogoutResponse { success: true })))
}

// GET /api/session — verifica a sessão sem tocar no banco
#[utoipa::path(
    get,
    path = "/api/session",
    tag = "Auth",
    responses(
        (status = 200, description = "Stato della sessione", body = SessionResponse)
    )
)]
pub async fn session(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> Json<SessionResponse> {
    let user = match jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
    {
        Some(session_id) => app_state.sessions.get(session_id).await,
        None => None,
    };

    Json(SessionResponse {
        authenticated: user.is_some(),
        user,
    })
}
