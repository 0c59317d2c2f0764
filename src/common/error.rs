use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// A taxonomia segue os códigos HTTP da API: 400 / 401 / 403 / 404 / 500.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Tabella non valida: {0}")]
    InvalidTable(String),

    #[error("{0}")]
    InvalidPayload(String),

    #[error("{0}")]
    InvalidUpload(String),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Não autenticado")]
    NotAuthenticated,

    #[error("Privilégios de super admin requeridos")]
    SuperAdminRequired,

    #[error("Operação reservada a usuários de um tenant")]
    TenantRequired,

    #[error("Registro não encontrado")]
    RecordNotFound,

    #[error("{0}")]
    UniqueConstraintViolation(String),

    // Exclusão bloqueada por polizze que referenciam o registro
    #[error("{0}")]
    RecordInUse(String),

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Campi non validi",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::InvalidTable(_) => {
                (StatusCode::BAD_REQUEST, "Tabella non valida".to_string())
            }
            AppError::InvalidPayload(msg) | AppError::InvalidUpload(msg) => {
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::UniqueConstraintViolation(msg) | AppError::RecordInUse(msg) => {
                (StatusCode::BAD_REQUEST, msg)
            }

            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Credenziali non valide".to_string())
            }
            AppError::NotAuthenticated => {
                (StatusCode::UNAUTHORIZED, "Non autenticato".to_string())
            }

            AppError::SuperAdminRequired => (
                StatusCode::FORBIDDEN,
                "Accesso negato: richiesti privilegi di super admin".to_string(),
            ),
            AppError::TenantRequired => (
                StatusCode::FORBIDDEN,
                "Operazione riservata agli utenti di un tenant".to_string(),
            ),

            AppError::RecordNotFound => {
                (StatusCode::NOT_FOUND, "Record non trovato".to_string())
            }

            // Erros de banco repassam a mensagem original ao cliente,
            // como fazia a implementação de referência.
            AppError::DatabaseError(e) => {
                tracing::error!("Erro de banco de dados: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }

            ref e => {
                tracing::error!("Erro interno do servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Errore interno del server".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_table_is_bad_request() {
        let resp = AppError::InvalidTable("orders".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn auth_errors_map_to_401_and_403() {
        assert_eq!(
            AppError::NotAuthenticated.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::InvalidCredentials.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::SuperAdminRequired.into_response().status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(
            AppError::RecordNotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn record_in_use_maps_to_400() {
        let resp =
            AppError::RecordInUse("Impossibile eliminare: ha polizze associate".into())
                .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
