//! Shared application state type.

use crate::bootstrap::AxumContext;
use std::sync::Arc;

/// Application state shared across all handlers.
///
/// An Arc-wrapped [`AxumContext`] holding the catalog service, the
/// obfuscator, the admission queue and the upstream fetcher.
pub type AppState = Arc<AxumContext>;
