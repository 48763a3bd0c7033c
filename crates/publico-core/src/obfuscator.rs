//! Public id obfuscation.
//!
//! Content-store record ids encode which tables and bases the site is built
//! on, so public responses carry a short digest token instead. The map is an
//! explicitly constructed service owned by the composition root (lifecycle =
//! process lifetime), not ambient global state.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Mutex;

/// Length of the public token, in hex characters.
const TOKEN_LEN: usize = 10;

/// Bidirectional record-id ↔ public-token map.
///
/// Tokens are deterministic (a digest prefix of the record id), so the map
/// survives restarts without persistence: remapping the same record yields
/// the same token.
#[derive(Default)]
pub struct IdObfuscator {
    reverse: Mutex<HashMap<String, String>>,
}

impl IdObfuscator {
    /// Create an empty obfuscator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Public token for a record id, registering the reverse mapping.
    pub fn public_id(&self, record_id: &str) -> String {
        let token = derive_token(record_id);
        let mut reverse = self.reverse.lock().unwrap_or_else(|e| e.into_inner());
        reverse
            .entry(token.clone())
            .or_insert_with(|| record_id.to_string());
        token
    }

    /// Resolve a public token back to the record id, if we have issued it.
    pub fn resolve(&self, token: &str) -> Option<String> {
        let reverse = self.reverse.lock().unwrap_or_else(|e| e.into_inner());
        reverse.get(token).cloned()
    }

    /// Resolve a token, falling back to treating it as a raw record id.
    ///
    /// Covers deep links that arrive before any list request has populated
    /// the map on this process.
    pub fn resolve_or_raw(&self, token: &str) -> String {
        self.resolve(token).unwrap_or_else(|| token.to_string())
    }
}

fn derive_token(record_id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(record_id.as_bytes());
    let digest = hasher.finalize();
    let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    hex[..TOKEN_LEN].to_string()
}
