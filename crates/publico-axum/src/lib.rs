//! Axum web server adapter for publico.
//!
//! Exposes the catalog API under `/api`, the admission-controlled image
//! proxy under `/proxy-image`, and optional static SPA serving. All
//! services are constructed in [`bootstrap`] and shared through
//! [`AppState`]; handlers hold no state of their own.

#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings for the integration test suite
#[cfg(test)]
use async_trait as _;
#[cfg(test)]
use http_body_util as _;
#[cfg(test)]
use image as _;
#[cfg(test)]
use serde_json as _;
#[cfg(test)]
use tower as _;

pub mod bootstrap;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-export primary types
pub use bootstrap::{AxumContext, CorsConfig, ServerConfig, bootstrap, start_server};
pub use error::HttpError;
pub use routes::{create_router, create_spa_router};
pub use state::AppState;
