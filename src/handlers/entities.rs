// src/handlers/entities.rs
//
// O CRUD genérico sobre as quatro tabelas de domínio. O nome da tabela é
// convertido logo no enum fechado: qualquer outro valor é 400 antes de
// qualquer SQL. O tenant vem sempre da sessão, nunca do cliente.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedSession,
    models::entities::EntityKind,
};

fn parse_table(table: &str) -> Result<EntityKind, AppError> {
    table
        .parse()
        .map_err(|_| AppError::InvalidTable(table.to_string()))
}

fn as_object(payload: &Value) -> Result<&Map<String, Value>, AppError> {
    payload
        .as_object()
        .ok_or_else(|| AppError::InvalidPayload("Payload JSON non valido".to_string()))
}

// GET /api/{table}
#[utoipa::path(
    get,
    path = "/api/{table}",
    tag = "CRUD",
    params(("table" = String, Path, description = "clients | businesses | companies | policies")),
    responses(
        (status = 200, description = "Tutte le righe del tenant", body = Vec<serde_json::Value>),
        (status = 400, description = "Tabella non valida"),
        (status = 401, description = "Non autenticato")
    ),
    security(("session_cookie" = []))
)]
pub async fn list_records(
    State(app_state): State<AppState>,
    session: AuthenticatedSession,
    Path(table): Path<String>,
) -> Result<Json<Vec<Value>>, AppError> {
    let kind = parse_table(&table)?;
    let tenant_id = session.tenant_id()?;

    Ok(Json(app_state.entity_service.list(kind, tenant_id).await?))
}

// GET /api/{table}/{id}
#[utoipa::path(
    get,
    path = "/api/{table}/{id}",
    tag = "CRUD",
    params(
        ("table" = String, Path, description = "clients | businesses | companies | policies"),
        ("id" = Uuid, Path, description = "Id del record")
    ),
    responses(
        (status = 200, description = "Il record", body = serde_json::Value),
        (status = 404, description = "Record non trovato (o di un altro tenant)")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_record(
    State(app_state): State<AppState>,
    session: AuthenticatedSession,
    Path((table, id)): Path<(String, Uuid)>,
) -> Result<Json<Value>, AppError> {
    let kind = parse_table(&table)?;
    let tenant_id = session.tenant_id()?;

    Ok(Json(app_state.entity_service.get(kind, tenant_id, id).await?))
}

// POST /api/{table}
#[utoipa::path(
    post,
    path = "/api/{table}",
    tag = "CRUD",
    params(("table" = String, Path, description = "clients | businesses | companies | policies")),
    request_body = serde_json::Value,
    responses(
        (status = 201, description = "Record creato: id generato + payload normalizzato", body = serde_json::Value),
        (status = 400, description = "Tabella o colonna non valida")
    ),
    security(("session_cookie" = []))
)]
pub async fn create_record(
    State(app_state): State<AppState>,
    session: AuthenticatedSession,
    Path(table): Path<String>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let kind = parse_table(&table)?;
    let tenant_id = session.tenant_id()?;
    let payload = as_object(&payload)?;

    let created = app_state
        .entity_service
        .create(kind, tenant_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

// PUT /api/{table}/{id}
#[utoipa::path(
    put,
    path = "/api/{table}/{id}",
    tag = "CRUD",
    params(
        ("table" = String, Path, description = "clients | businesses | companies | policies"),
        ("id" = Uuid, Path, description = "Id del record")
    ),
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Record aggiornato", body = serde_json::Value),
        (status = 404, description = "Record non trovato (o di un altro tenant)")
    ),
    security(("session_cookie" = []))
)]
pub async fn update_record(
    State(app_state): State<AppState>,
    session: AuthenticatedSession,
    Path((table, id)): Path<(String, Uuid)>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let kind = parse_table(&table)?;
    let tenant_id = session.tenant_id()?;
    let payload = as_object(&payload)?;

    let updated = app_state
        .entity_service
        .update(kind, tenant_id, id, payload)
        .await?;
    Ok(Json(updated))
}

// DELETE /api/{table}/{id}
#[utoipa::path(
    delete,
    path = "/api/{table}/{id}",
    tag = "CRUD",
    params(
        ("table" = String, Path, description = "clients | businesses | companies | policies"),
        ("id" = Uuid, Path, description = "Id del record")
    ),
    responses(
        (status = 200, description = "Record eliminato"),
        (status = 400, description = "Il record è referenziato da polizze"),
        (status = 404, description = "Record non trovato (o di un altro tenant)")
    ),
    security(("session_cookie" = []))
)]
pub async fn delete_record(
    State(app_state): State<AppState>,
    session: AuthenticatedSession,
    Path((table, id)): Path<(String, Uuid)>,
) -> Result<Json<Value>, AppError> {
    let kind = parse_table(&table)?;
    let tenant_id = session.tenant_id()?;

    app_state.entity_service.delete(kind, tenant_id, id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
