// src/handlers/tenancy.rs
//
// Administração de tenants e dos seus admins. Todas as rotas aqui ficam
// atrás do super_admin_guard.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::tenancy::{
        AdminUserSummary, CreateAdminUserPayload, CreateTenantPayload, Tenant,
        TenantWithUserCount,
    },
};

// POST /api/tenants
#[utoipa::path(
    post,
    path = "/api/tenants",
    tag = "Tenancy",
    request_body = CreateTenantPayload,
    responses(
        (status = 201, description = "Tenant creato", body = Tenant),
        (status = 403, description = "Richiesti privilegi di super admin")
    ),
    security(("session_cookie" = []))
)]
pub async fn create_tenant(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateTenantPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let tenant = app_state.tenancy_service.create_tenant(&payload.nome).await?;
    Ok((StatusCode::CREATED, Json(tenant)))
}

// GET /api/tenants
#[utoipa::path(
    get,
    path = "/api/tenants",
    tag = "Tenancy",
    responses(
        (status = 200, description = "Tenants con numero di utenti", body = Vec<TenantWithUserCount>),
        (status = 403, description = "Richiesti privilegi di super admin")
    ),
    security(("session_cookie" = []))
)]
pub async fn list_tenants(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<TenantWithUserCount>>, AppError> {
    Ok(Json(app_state.tenancy_service.list_tenants().await?))
}

// POST /api/admin-users
#[utoipa::path(
    post,
    path = "/api/admin-users",
    tag = "Tenancy",
    request_body = CreateAdminUserPayload,
    responses(
        (status = 201, description = "Admin creato", body = AdminUserSummary),
        (status = 400, description = "Username già esistente"),
        (status = 403, description = "Richiesti privilegi di super admin")
    ),
    security(("session_cookie" = []))
)]
pub async fn create_admin_user(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateAdminUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let admin = app_state.tenancy_service.create_admin_user(payload).await?;
    Ok((StatusCode::CREATED, Json(admin)))
}

// GET /api/admin-users
#[utoipa::path(
    get,
    path = "/api/admin-users",
    tag = "Tenancy",
    responses(
        (status = 200, description = "Admins con il nome del tenant", body = Vec<AdminUserSummary>),
        (status = 403, description = "Richiesti privilegi di super admin")
    ),
    security(("session_cookie" = []))
)]
pub async fn list_admin_users(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<AdminUserSummary>>, AppError> {
    Ok(Json(app_state.tenancy_service.list_admin_users().await?))
}
