//! HTTP request handlers.

pub mod apps;
pub mod docs;
pub mod proxy_image;
