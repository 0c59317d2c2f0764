// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::session,

        // --- Tenancy (super admin) ---
        handlers::tenancy::create_tenant,
        handlers::tenancy::list_tenants,
        handlers::tenancy::create_admin_user,
        handlers::tenancy::list_admin_users,

        // --- CRUD genérico ---
        handlers::entities::list_records,
        handlers::entities::get_record,
        handlers::entities::create_record,
        handlers::entities::update_record,
        handlers::entities::delete_record,

        // --- Dashboard ---
        handlers::dashboard::expiring_policies,

        // --- Uploads ---
        handlers::uploads::upload_pdf,
        handlers::uploads::serve_pdf,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::SessionUser,
            models::auth::LoginPayload,
            models::auth::LoginResponse,
            models::auth::SessionResponse,
            models::auth::LogoutResponse,

            // --- Tenancy ---
            models::tenancy::Tenant,
            models::tenancy::TenantWithUserCount,
            models::tenancy::CreateTenantPayload,
            models::tenancy::CreateAdminUserPayload,
            models::tenancy::AdminUserSummary,

            // --- Polizze ---
            models::entities::HolderType,
            models::policies::PolicyStatus,
            models::dashboard::ExpiringPolicy,

            // --- Uploads ---
            handlers::uploads::UploadResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Login, logout e sessione"),
        (name = "Tenancy", description = "Gestione tenants e admin (solo super admin)"),
        (name = "CRUD", description = "Clienti, aziende, compagnie e polizze"),
        (name = "Dashboard", description = "Polizze in scadenza"),
        (name = "Uploads", description = "PDF di polizza")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("gestionale_session"))),
        );
    }
}
