// src/services/auth.rs

use bcrypt::{hash, verify};

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::SessionUser,
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
}

impl AuthService {
    pub fn new(user_repo: UserRepository) -> Self {
        Self { user_repo }
    }

    /// Autentica um admin (com tenant_name) ou um super admin (sem).
    /// "Usuário inexistente" e "senha errada" retornam o mesmo erro.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        tenant_name: Option<&str>,
    ) -> Result<SessionUser, AppError> {
        let user = self
            .user_repo
            .find_for_login(username, tenant_name)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação bcrypt em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        Ok(SessionUser::from(user))
    }

    /// Garante que exista ao menos um super admin (porta de entrada do
    /// sistema recém-instalado). Credenciais vêm do ambiente.
    pub async fn bootstrap_super_admin(&self) -> Result<(), AppError> {
        if self.user_repo.super_admin_exists().await? {
            return Ok(());
        }

        let username =
            std::env::var("SUPER_ADMIN_USERNAME").unwrap_or_else(|_| "superadmin".to_string());
        let password =
            std::env::var("SUPER_ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());

        let password_hash =
            tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        self.user_repo
            .create_super_admin(&username, &password_hash)
            .await?;

        tracing::warn!(
            "⚠️  Super admin '{}' criado com a senha padrão — troque-a imediatamente!",
            username
        );
        Ok(())
    }
}
