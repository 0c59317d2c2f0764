// src/models/tenancy.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// ---
// 1. Tenant (L'agenzia)
// ---
// A conta isolada: todos os dados de domínio são particionados por tenant.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Tenant {
    pub id: Uuid,
    pub nome: String,
    pub created_at: DateTime<Utc>,
}

// Tenant com a contagem de usuários, para a listagem do super admin
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct TenantWithUserCount {
    pub id: Uuid,
    pub nome: String,
    pub created_at: DateTime<Utc>,
    pub user_count: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTenantPayload {
    #[validate(length(min = 1, message = "Nome tenant richiesto"))]
    pub nome: String,
}

// ---
// 2. Admin de tenant (criado pelo super admin)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAdminUserPayload {
    pub tenant_id: Uuid,
    #[validate(length(min = 1, message = "Username richiesto"))]
    pub username: String,
    #[validate(length(min = 6, message = "La password deve avere almeno 6 caratteri"))]
    pub password: String,
    #[validate(length(min = 1, message = "Nome richiesto"))]
    pub nome: String,
    #[validate(length(min = 1, message = "Cognome richiesto"))]
    pub cognome: String,
    #[validate(email(message = "Email non valida"))]
    pub email: Option<String>,
}

// Resumo devolvido pela API (sem hash)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AdminUserSummary {
    pub id: Uuid,
    pub tenant_id: Option<Uuid>,
    pub username: String,
    pub nome: String,
    pub cognome: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub tenant_name: Option<String>,
}
