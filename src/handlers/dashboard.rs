// src/handlers/dashboard.rs

use axum::{Json, extract::State};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedSession,
    models::dashboard::ExpiringPolicy,
};

// GET /api/dashboard/expiring
#[utoipa::path(
    get,
    path = "/api/dashboard/expiring",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Polizze in scadenza nei prossimi 30 giorni", body = Vec<ExpiringPolicy>),
        (status = 401, description = "Non autenticato")
    ),
    security(("session_cookie" = []))
)]
pub async fn expiring_policies(
    State(app_state): State<AppState>,
    session: AuthenticatedSession,
) -> Result<Json<Vec<ExpiringPolicy>>, AppError> {
    let tenant_id = session.tenant_id()?;

    let policies = app_state
        .dashboard_service
        .expiring_policies(tenant_id)
        .await?;

    Ok(Json(policies))
}
