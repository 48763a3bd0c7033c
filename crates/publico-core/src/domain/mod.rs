//! Catalog domain records.
//!
//! These are the typed shapes the rest of the system works with. Upstream
//! content-store records are validated into these at the client boundary;
//! nothing loosely typed crosses into core.

mod app;
mod document;
mod screen;

pub use app::{AppFilter, AppKind, AppRecord, Platform};
pub use document::{DocumentRecord, DocumentStatus};
pub use screen::ScreenRecord;
