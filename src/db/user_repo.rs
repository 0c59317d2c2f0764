// src/db/user_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        auth::UserRecord,
        tenancy::AdminUserSummary,
    },
};

// O repositório de usuários: todas as interações com a tabela 'users'.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Busca o candidato ao login. Com tenant_name só aceita admins daquele
    /// tenant; sem tenant_name só aceita super admins. Quem chama não
    /// distingue "usuário inexistente" de "senha errada".
    pub async fn find_for_login(
        &self,
        username: &str,
        tenant_name: Option<&str>,
    ) -> Result<Option<UserRecord>, AppError> {
        let user = match tenant_name {
            Some(tenant_name) => {
                sqlx::query_as::<_, UserRecord>(
                    r#"
                    SELECT u.id, u.tenant_id, u.username, u.password_hash,
                           u.nome, u.cognome, u.email, u.role,
                           t.nome AS tenant_name
                    FROM users u
                    LEFT JOIN tenants t ON u.tenant_id = t.id
                    WHERE u.username = $1
                      AND u.role = 'admin'
                      AND t.nome = $2
                    "#,
                )
                .bind(username)
                .bind(tenant_name)
                .fetch_optional(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, UserRecord>(
                    r#"
                    SELECT u.id, u.tenant_id, u.username, u.password_hash,
                           u.nome, u.cognome, u.email, u.role,
                           t.nome AS tenant_name
                    FROM users u
                    LEFT JOIN tenants t ON u.tenant_id = t.id
                    WHERE u.username = $1
                      AND u.role = 'super_admin'
                    "#,
                )
                .bind(username)
                .fetch_optional(&self.pool)
                .await?
            }
        };

        Ok(user)
    }

    /// Cria um admin para um tenant (operação do super admin).
    pub async fn create_admin(
        &self,
        tenant_id: Uuid,
        username: &str,
        password_hash: &str,
        nome: &str,
        cognome: &str,
        email: Option<&str>,
    ) -> Result<AdminUserSummary, AppError> {
        sqlx::query_as::<_, AdminUserSummary>(
            r#"
            INSERT INTO users (tenant_id, username, password_hash, nome, cognome, email, role)
            VALUES ($1, $2, $3, $4, $5, $6, 'admin')
            RETURNING id, tenant_id, username, nome, cognome, email, created_at,
                      (SELECT t.nome FROM tenants t WHERE t.id = tenant_id) AS tenant_name
            "#,
        )
        .bind(tenant_id)
        .bind(username)
        .bind(password_hash)
        .bind(nome)
        .bind(cognome)
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(
                        "Username già esistente".to_string(),
                    );
                }
                if db_err.is_foreign_key_violation() {
                    return AppError::InvalidPayload("Tenant inesistente".to_string());
                }
            }
            e.into()
        })
    }

    /// Lista todos os admins com o nome do tenant, para o painel do super admin.
    pub async fn list_admins(&self) -> Result<Vec<AdminUserSummary>, AppError> {
        let admins = sqlx::query_as::<_, AdminUserSummary>(
            r#"
            SELECT u.id, u.tenant_id, u.username, u.nome, u.cognome, u.email,
                   u.created_at, t.nome AS tenant_name
            FROM users u
            LEFT JOIN tenants t ON u.tenant_id = t.id
            WHERE u.role = 'admin'
            ORDER BY t.nome, u.username
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(admins)
    }

    pub async fn super_admin_exists(&self) -> Result<bool, AppError> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM users WHERE role = 'super_admin')",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(exists.0)
    }

    pub async fn create_super_admin(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO users (tenant_id, username, password_hash, nome, cognome, role)
            VALUES (NULL, $1, $2, 'Super', 'Admin', 'super_admin')
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
