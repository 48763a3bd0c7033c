//! Content-store HTTP client for publico.
//!
//! Implements the `ContentStore` port from `publico-core` against an
//! Airtable-style REST API: bearer-authenticated JSON over HTTPS, record
//! lists under per-table paths, loosely typed `fields` objects validated
//! into core records at this boundary.

#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod error;
mod http;
mod parsing;
mod url;

// ============================================================================
// Public API
// ============================================================================

pub use client::{ContentStoreClient, DefaultContentClient};
pub use config::ContentConfig;
pub use error::{ContentError, ContentResult};
