// src/handlers/uploads.rs
//
// Upload e download dos PDF di polizza. O upload é uma requisição separada
// do salvataggio do record: o frontend primeiro sobe o arquivo, depois
// grava o nome retornado em pdf_polizza_name.

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    common::error::AppError, config::AppState, middleware::auth::AuthenticatedSession,
};

/// Limite de 10 MB por arquivo, como no multer original.
pub const MAX_PDF_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub success: bool,
    pub filename: String,
    pub url: String,
}

// POST /api/upload-pdf (multipart, campo "pdf")
#[utoipa::path(
    post,
    path = "/api/upload-pdf",
    tag = "Uploads",
    responses(
        (status = 200, description = "File salvato", body = UploadResponse),
        (status = 400, description = "File mancante, non PDF o troppo grande"),
        (status = 401, description = "Non autenticato")
    ),
    security(("session_cookie" = []))
)]
pub async fn upload_pdf(
    State(app_state): State<AppState>,
    _session: AuthenticatedSession,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidUpload(format!("Errore upload: {}", e)))?
    {
        if field.name() != Some("pdf") {
            continue;
        }

        // Valida o MIME antes de ler qualquer byte: nada é escrito em disco
        // para um arquivo recusado.
        if field.content_type() != Some("application/pdf") {
            return Err(AppError::InvalidUpload(
                "Solo file PDF sono consentiti".to_string(),
            ));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidUpload(format!("Errore upload: {}", e)))?;

        if data.is_empty() {
            return Err(AppError::InvalidUpload("Nessun file caricato".to_string()));
        }
        if data.len() > MAX_PDF_BYTES {
            return Err(AppError::InvalidUpload(
                "File troppo grande (max 10MB)".to_string(),
            ));
        }

        // Nome gerado sem nada do cliente; o timestamp é a unicidade.
        let filename = format!("policy_{}.pdf", Utc::now().timestamp_millis());
        let destination = app_state.upload_dir.join(&filename);

        tokio::fs::write(&destination, &data)
            .await
            .map_err(|e| anyhow::anyhow!("Falha ao salvar o PDF: {}", e))?;

        tracing::info!("📄 File salvato come: {}", filename);

        return Ok(Json(UploadResponse {
            success: true,
            url: format!("/uploads/{}", filename),
            filename,
        }));
    }

    Err(AppError::InvalidUpload("Nessun file caricato".to_string()))
}

// GET /uploads/{filename} — serve um PDF salvo (autenticado)
#[utoipa::path(
    get,
    path = "/uploads/{filename}",
    tag = "Uploads",
    params(("filename" = String, Path, description = "Nome gerado no upload")),
    responses(
        (status = 200, description = "Il PDF"),
        (status = 404, description = "File inesistente")
    ),
    security(("session_cookie" = []))
)]
pub async fn serve_pdf(
    State(app_state): State<AppState>,
    _session: AuthenticatedSession,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    // Só nomes no formato que nós mesmos geramos; nada de path traversal.
    if filename.contains('/')
        || filename.contains('\\')
        || filename.contains("..")
        || !filename.ends_with(".pdf")
    {
        return Err(AppError::RecordNotFound);
    }

    let bytes = tokio::fs::read(app_state.upload_dir.join(&filename))
        .await
        .map_err(|_| AppError::RecordNotFound)?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", filename),
        ),
    ];

    Ok((headers, bytes).into_response())
}
