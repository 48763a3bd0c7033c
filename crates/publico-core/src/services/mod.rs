//! Core services - use-case logic over the ports.

mod catalog;

pub use catalog::CatalogService;
