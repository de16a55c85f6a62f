use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::gemini::GeminiError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant collapses to the same `500 {"error": "Internal server
/// error"}` response; the variants exist so callers branch on kind and so
/// the server-side trace keeps the underlying cause. Upstream status and
/// body text are never forwarded to the client.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<GeminiError> for AppError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::Upstream { status, body } => AppError::Upstream { status, body },
            other => AppError::Internal(other.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Validation(msg) => {
                tracing::warn!("Validation error: {msg}");
            }
            AppError::Upstream { status, body } => {
                tracing::error!("Gemini API error (status {status}): {body}");
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
            }
        }

        let body = Json(json!({ "error": "Internal server error" }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
