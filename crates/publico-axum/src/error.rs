//! Axum-specific error types and mappings.
//!
//! Maps `CoreError` and the imaging errors to HTTP status codes and a
//! JSON `{ error, status }` body. Proxy failures additionally carry the
//! originally requested path for diagnosis.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use publico_core::{ContentStoreError, CoreError};
use serde::Serialize;
use thiserror::Error;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request (invalid input).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Service unavailable (content store down).
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Upstream image fetch failed.
    #[error("Upstream fetch for '{path}' failed: {message}")]
    BadGateway { path: String, message: String },

    /// Image decode/encode failed.
    #[error("Processing '{path}' failed: {message}")]
    ProcessingFailed { path: String, message: String },

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
    /// Requested upstream path, present on proxy failures
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message, path) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            Self::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg, None),
            Self::BadGateway { path, message } => (StatusCode::BAD_GATEWAY, message, Some(path)),
            Self::ProcessingFailed { path, message } => {
                (StatusCode::INTERNAL_SERVER_ERROR, message, Some(path))
            }
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
        };

        let body = ErrorBody {
            error: message,
            status: status.as_u16(),
            path,
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<CoreError> for HttpError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound(msg) => Self::NotFound(msg),
            CoreError::Validation(msg) => Self::BadRequest(msg),
            CoreError::Content(content_err) => content_err.into(),
            CoreError::Configuration(msg) => Self::Internal(format!("Config: {msg}")),
            CoreError::ExternalService(msg) => Self::ServiceUnavailable(msg),
            CoreError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl From<ContentStoreError> for HttpError {
    fn from(err: ContentStoreError) -> Self {
        match err {
            ContentStoreError::NotFound(id) => Self::NotFound(id),
            ContentStoreError::Unavailable(msg) => Self::ServiceUnavailable(msg),
            ContentStoreError::Malformed(msg) => Self::Internal(format!("Malformed: {msg}")),
        }
    }
}
