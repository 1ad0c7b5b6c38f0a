use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every client-visible body is `{"error": message}`. Upstream and internal
/// causes are logged server-side and replaced with a generic message — the
/// caller never sees provider internals.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    /// Client input error; the message names the constraint that failed
    /// ("Missing jd field", "Too short", ...).
    #[error("{0}")]
    Validation(String),

    #[error("Too many requests")]
    RateLimited,

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// Model replied, but the reply had no parseable, schema-valid JSON.
    #[error("Model output rejected: {0}")]
    ModelOutput(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many requests".to_string(),
            ),
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Processing failed".to_string(),
                )
            }
            AppError::ModelOutput(detail) => {
                tracing::error!("Model output rejected: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Processing failed".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Processing failed".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}
