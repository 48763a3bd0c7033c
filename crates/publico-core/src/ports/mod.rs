//! Port definitions - the seams between core and infrastructure.

mod content_store;

pub use content_store::{ContentStore, ContentStoreError};
