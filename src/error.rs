// src/error.rs

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Global Application Error Enum.
/// Shared by the HTTP service and the extraction pipeline.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Question Store artifact is missing (pipeline never ran).
    #[error("{0}")]
    NotFound(String),

    /// Malformed JSON, either from the store or from the model.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The language-model service failed or answered unusably.
    #[error("Model service error: {0}")]
    Collaborator(String),

    #[error("Could not read document {path}: {reason}")]
    DocumentRead { path: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalServerError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Parse(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Collaborator(msg) => {
                tracing::error!("Model service error: {}", msg);
                (StatusCode::BAD_GATEWAY, "Model service unavailable".to_string())
            }
            other => {
                tracing::error!("Internal Server Error: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Parse(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Collaborator(err.to_string())
    }
}

/// Malformed request bodies become `BadRequest` so clients always get JSON.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
