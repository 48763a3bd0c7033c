//! Editorial documents (about pages, methodology notes) fetched by title.

use serde::{Deserialize, Serialize};

/// Publication state of a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Published,
    Draft,
}

impl Default for DocumentStatus {
    fn default() -> Self {
        Self::Draft
    }
}

/// A markdown document. Content is passed through opaque; rendering and
/// sanitization happen client-side.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Content-store record id.
    pub id: String,
    /// Unique title used as the lookup key.
    pub title: String,
    /// Raw markdown body.
    #[serde(default)]
    pub content: String,
    /// Publication state.
    #[serde(default)]
    pub status: DocumentStatus,
}
