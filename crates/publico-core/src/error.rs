//! Core error taxonomy.
//!
//! Adapter crates map `CoreError` to their own surfaces (HTTP status codes,
//! CLI exit messages). Content-store failures arrive through the port error
//! and are wrapped transparently.

use crate::ports::ContentStoreError;
use thiserror::Error;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Top-level error type for core services.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Content-store operation failed.
    #[error(transparent)]
    Content(#[from] ContentStoreError),

    /// Requested entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error (invalid input).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// External service error.
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Internal error (unexpected condition).
    #[error("Internal error: {0}")]
    Internal(String),
}
