// src/models/auth.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Papel do usuário: admin pertence a um tenant, super_admin é global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    SuperAdmin,
}

// Representa um usuário vindo do banco de dados (com o hash, nunca serializado)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub tenant_id: Option<Uuid>,
    pub username: String,
    pub password_hash: String,
    pub nome: String,
    pub cognome: String,
    pub email: Option<String>,
    pub role: Role,
    // Vem do LEFT JOIN com tenants
    pub tenant_name: Option<String>,
}

// O resumo do usuário guardado na sessão e devolvido pela API.
// Sem hash de senha.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionUser {
    pub id: Uuid,
    pub username: String,
    pub nome: String,
    pub cognome: String,
    pub role: Role,
    pub tenant_id: Option<Uuid>,
    pub tenant_name: Option<String>,
}

impl From<UserRecord> for SessionUser {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            username: user.username,
            nome: user.nome,
            cognome: user.cognome,
            role: user.role,
            tenant_id: user.tenant_id,
            tenant_name: user.tenant_name,
        }
    }
}

// Dados para login. tenant_name ausente = tentativa de login super admin.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(length(min = 1, message = "Username richiesto"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password richiesta"))]
    pub password: String,
    pub tenant_name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub user: SessionUser,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LogoutResponse {
    pub success: bool,
}
