//src/main.rs

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::handlers::uploads::MAX_PDF_BYTES;
use crate::middleware::auth::{auth_guard, super_admin_guard};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Primeira instalação: garante um super admin para entrar no sistema
    app_state
        .auth_service
        .bootstrap_super_admin()
        .await
        .expect("Falha ao criar o super admin inicial.");

    // Rotas de autenticação (login é público; session/logout resolvem o
    // cookie por conta própria)
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/session", get(handlers::auth::session));

    // Administração de tenants e admins: auth + papel super_admin
    let super_admin_routes = Router::new()
        .route(
            "/tenants",
            post(handlers::tenancy::create_tenant).get(handlers::tenancy::list_tenants),
        )
        .route(
            "/admin-users",
            post(handlers::tenancy::create_admin_user)
                .get(handlers::tenancy::list_admin_users),
        )
        .layer(axum_middleware::from_fn(super_admin_guard))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Upload de PDF: o limite do body fica um pouco acima do tamanho máximo
    // do arquivo, para o handler responder 400 em vez de 413
    let upload_routes = Router::new()
        .route("/upload-pdf", post(handlers::uploads::upload_pdf))
        .layer(DefaultBodyLimit::max(MAX_PDF_BYTES + 1024 * 1024))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let dashboard_routes = Router::new()
        .route(
            "/dashboard/expiring",
            get(handlers::dashboard::expiring_policies),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // O CRUD genérico fica por último: as rotas estáticas acima têm
    // prioridade sobre /{table}
    let crud_routes = Router::new()
        .route(
            "/{table}",
            get(handlers::entities::list_records).post(handlers::entities::create_record),
        )
        .route(
            "/{table}/{id}",
            get(handlers::entities::get_record)
                .put(handlers::entities::update_record)
                .delete(handlers::entities::delete_record),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // PDFs salvos, atrás de autenticação
    let uploads_static = Router::new()
        .route("/uploads/{filename}", get(handlers::uploads::serve_pdf))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let app = Router::new()
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .route("/api/health", get(|| async { "OK" }))
        .nest(
            "/api",
            auth_routes
                .merge(super_admin_routes)
                .merge(upload_routes)
                .merge(dashboard_routes)
                .merge(crud_routes),
        )
        .merge(uploads_static)
        .with_state(app_state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
