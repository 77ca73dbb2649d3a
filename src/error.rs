/**
 * Error Types
 * Typed failure taxonomy shared by the repository, codec, and HTTP layer
 */
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the content repository, ordering engine, and backup
/// codec. Every variant maps to a distinct HTTP status so the admin UI can
/// branch on not-found vs bad-input vs storage-broken.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("validation failed: {0}")]
    Validation(String),

    /// A stored content/settings blob exists but is not parseable JSON.
    /// An absent blob is NOT an error; it reads back as an empty mapping.
    #[error("stored {field} payload for section {id} is corrupt")]
    CorruptData { field: &'static str, id: i64 },

    /// An import snapshot is missing required top-level structure.
    #[error("invalid snapshot format: {0}")]
    InvalidFormat(String),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// The database pool was never initialized.
    #[error("database not available")]
    Unavailable,

    #[error("{0}")]
    Unauthorized(&'static str),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::InvalidFormat(_) => StatusCode::BAD_REQUEST,
            ApiError::CorruptData { .. } | ApiError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Storage details stay in the logs, not in the response body.
        let error = match &self {
            ApiError::Storage(e) => {
                tracing::error!("storage error: {}", e);
                "Storage error".to_string()
            }
            ApiError::CorruptData { .. } => {
                tracing::error!("{}", self);
                self.to_string()
            }
            other => other.to_string(),
        };

        (
            status,
            Json(ErrorResponse {
                error,
                message: None,
            }),
        )
            .into_response()
    }
}
