//! Content-store port.
//!
//! The content store is the external system holding authoritative
//! App/Screen/Document data. Implementations live in adapter crates;
//! core only sees this trait.

use crate::domain::{AppFilter, AppRecord, DocumentRecord, ScreenRecord};
use async_trait::async_trait;
use thiserror::Error;

/// Errors a content-store implementation can surface.
#[derive(Debug, Error)]
pub enum ContentStoreError {
    /// The requested record does not exist upstream.
    #[error("Record '{0}' not found in content store")]
    NotFound(String),

    /// The store is unreachable or returned a server error.
    #[error("Content store unavailable: {0}")]
    Unavailable(String),

    /// The store answered with a shape we refuse to pass through.
    #[error("Malformed content-store response: {0}")]
    Malformed(String),
}

/// Read access to the catalog's authoritative content.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// List published applications matching the filter.
    async fn list_apps(&self, filter: &AppFilter) -> Result<Vec<AppRecord>, ContentStoreError>;

    /// Fetch a single application by record id.
    async fn get_app(&self, id: &str) -> Result<AppRecord, ContentStoreError>;

    /// List the screens belonging to an application.
    async fn list_screens(&self, app_id: &str) -> Result<Vec<ScreenRecord>, ContentStoreError>;

    /// Fetch a document by its unique title.
    async fn get_document(&self, title: &str) -> Result<DocumentRecord, ContentStoreError>;
}
