//! Core domain types and port definitions for publico.
//!
//! This crate holds everything the adapters share: the catalog record
//! types, the `ContentStore` port, the read-side `CatalogService`, and the
//! `IdObfuscator` that keeps content-store record ids out of public URLs.
//! No HTTP, no image processing, no I/O beyond what callers inject.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod error;
pub mod obfuscator;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    AppFilter, AppKind, AppRecord, DocumentRecord, DocumentStatus, Platform, ScreenRecord,
};
pub use error::{CoreError, CoreResult};
pub use obfuscator::IdObfuscator;
pub use ports::{ContentStore, ContentStoreError};
pub use services::CatalogService;
