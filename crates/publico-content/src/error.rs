//! Internal error types for content-store operations.
//!
//! These errors are internal to `publico-content` and are mapped to the
//! core port error at the boundary.

use publico_core::ContentStoreError;
use thiserror::Error;

/// Result type alias for content-store operations.
pub type ContentResult<T> = Result<T, ContentError>;

/// Errors related to content-store API operations.
#[derive(Debug, Error)]
pub enum ContentError {
    /// API request failed with an HTTP error status.
    #[error("Content store request failed with status {status}: {url}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// The requested record was not found.
    #[error("Record '{id}' not found")]
    RecordNotFound {
        /// The record id (or lookup key) that was not found
        id: String,
    },

    /// API returned an invalid or unexpected response.
    #[error("Invalid response from content store: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl From<ContentError> for ContentStoreError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::RecordNotFound { id } => Self::NotFound(id),
            ContentError::RequestFailed { status: 404, url } => Self::NotFound(url),
            ContentError::InvalidResponse { message } => Self::Malformed(message),
            ContentError::JsonParse(e) => Self::Malformed(e.to_string()),
            other => Self::Unavailable(other.to_string()),
        }
    }
}
