//! Internal error types for imaging operations.

use thiserror::Error;

/// Result type alias for imaging operations.
pub type ImagingResult<T> = Result<T, ImagingError>;

/// Errors from the image proxy pipeline.
#[derive(Debug, Error)]
pub enum ImagingError {
    /// Upstream CDN answered with an HTTP error status.
    #[error("Upstream image fetch failed with status {status}: {url}")]
    Upstream {
        /// HTTP status code
        status: u16,
        /// The upstream URL that was requested
        url: String,
    },

    /// The proxied path could not be turned into an upstream URL.
    #[error("Invalid upstream path: {0}")]
    InvalidPath(String),

    /// Quality out of the 1-100 range.
    #[error("Invalid quality {0}, expected 1-100")]
    InvalidQuality(u8),

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Decode or encode failure.
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// Admission machinery failed (queue dropped mid-wait).
    #[error("Admission error: {0}")]
    Admission(String),
}
