// src/config.rs

use std::{env, path::PathBuf, time::Duration};

use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{
    db::{DashboardRepository, EntityRepository, TenantRepository, UserRepository},
    services::{
        auth::AuthService, dashboard_service::DashboardService, entity_service::EntityService,
        session::SessionStore, tenancy_service::TenancyService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub sessions: SessionStore,
    pub upload_dir: PathBuf,
    pub auth_service: AuthService,
    pub tenancy_service: TenancyService,
    pub entity_service: EntityService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let upload_dir =
            PathBuf::from(env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()));

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // Diretório dos PDF de polizza
        tokio::fs::create_dir_all(&upload_dir).await?;

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let tenant_repo = TenantRepository::new(db_pool.clone());
        let entity_repo = EntityRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo.clone());
        let tenancy_service = TenancyService::new(tenant_repo, user_repo);
        let entity_service = EntityService::new(entity_repo);
        let dashboard_service = DashboardService::new(dashboard_repo);

        Ok(Self {
            db_pool,
            sessions: SessionStore::new(),
            upload_dir,
            auth_service,
            tenancy_service,
            entity_service,
            dashboard_service,
        })
    }
}
