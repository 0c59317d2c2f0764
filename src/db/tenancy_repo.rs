// src/db/tenancy_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::tenancy::{Tenant, TenantWithUserCount},
};

#[derive(Clone)]
pub struct TenantRepository {
    pool: PgPool,
}

impl TenantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_tenant(&self, nome: &str) -> Result<Tenant, AppError> {
        let tenant = sqlx::query_as::<_, Tenant>(
            "INSERT INTO tenants (nome) VALUES ($1) RETURNING id, nome, created_at",
        )
        .bind(nome)
        .fetch_one(&self.pool)
        .await?;

        Ok(tenant)
    }

    /// Lista os tenants com a contagem de usuários de cada um.
    pub async fn list_tenants(&self) -> Result<Vec<TenantWithUserCount>, AppError> {
        let tenants = sqlx::query_as::<_, TenantWithUserCount>(
            r#"
            SELECT t.id, t.nome, t.created_at, COUNT(u.id) AS user_count
            FROM tenants t
            LEFT JOIN users u ON u.tenant_id = t.id
            GROUP BY t.id, t.nome, t.created_at
            ORDER BY t.nome
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tenants)
    }
}
