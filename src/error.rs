use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A write inside the import transaction failed and the rollback succeeded.
    #[error("Import failed: {0}")]
    ImportFailed(#[source] rusqlite::Error),

    /// The import failed and the rollback failed too. Stored data may be inconsistent.
    #[error("Import failed ({cause}) and rollback failed ({rollback})")]
    RollbackFailed {
        cause: rusqlite::Error,
        rollback: rusqlite::Error,
    },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Password hash error")]
    PasswordHash,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, detail) = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string(), None)
            }
            AppError::Pool(e) => {
                tracing::error!("Pool error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string(), None)
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string(), None),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone(), None),
            AppError::ImportFailed(e) => {
                tracing::warn!("Import rolled back: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Import failed".to_string(),
                    Some(format!("{}; previous data was restored", e)),
                )
            }
            AppError::RollbackFailed { cause, rollback } => {
                tracing::error!(
                    "Import failed and rollback failed, data may be inconsistent and needs operator attention: cause={:?} rollback={:?}",
                    cause,
                    rollback
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Import failed and rollback failed".to_string(),
                    Some(format!("import error: {}; rollback error: {}", cause, rollback)),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string(), None)
            }
            AppError::PasswordHash => {
                tracing::error!("Password hash error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string(), None)
            }
        };

        (status, Json(ErrorBody { error, detail })).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
