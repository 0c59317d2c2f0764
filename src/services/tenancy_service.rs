// src/services/tenancy_service.rs

use bcrypt::hash;

use crate::{
    common::error::AppError,
    db::{TenantRepository, UserRepository},
    models::tenancy::{AdminUserSummary, CreateAdminUserPayload, Tenant, TenantWithUserCount},
};

#[derive(Clone)]
pub struct TenancyService {
    tenant_repo: TenantRepository,
    user_repo: UserRepository,
}

impl TenancyService {
    pub fn new(tenant_repo: TenantRepository, user_repo: UserRepository) -> Self {
        Self {
            tenant_repo,
            user_repo,
        }
    }

    pub async fn create_tenant(&self, nome: &str) -> Result<Tenant, AppError> {
        let tenant = self.tenant_repo.create_tenant(nome).await?;
        tracing::info!("🏢 Tenant '{}' criado ({})", tenant.nome, tenant.id);
        Ok(tenant)
    }

    pub async fn list_tenants(&self) -> Result<Vec<TenantWithUserCount>, AppError> {
        self.tenant_repo.list_tenants().await
    }

    /// Cria o admin de um tenant. O hash roda fora do runtime async.
    pub async fn create_admin_user(
        &self,
        payload: CreateAdminUserPayload,
    ) -> Result<AdminUserSummary, AppError> {
        let password = payload.password.clone();
        let password_hash =
            tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        self.user_repo
            .create_admin(
                payload.tenant_id,
                &payload.username,
                &password_hash,
                &payload.nome,
                &payload.cognome,
                payload.email.as_deref(),
            )
            .await
    }

    pub async fn list_admin_users(&self) -> Result<Vec<AdminUserSummary>, AppError> {
        self.user_repo.list_admins().await
    }
}
