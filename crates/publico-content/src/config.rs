//! Client configuration.

use crate::error::{ContentError, ContentResult};
use std::time::Duration;
use url::Url;

/// Environment variable holding the store's base URL (required).
const ENV_BASE_URL: &str = "PUBLICO_CONTENT_BASE_URL";
/// Environment variable holding the API key (optional for public bases).
const ENV_API_KEY: &str = "PUBLICO_CONTENT_API_KEY";

/// Configuration for the content-store client.
#[derive(Clone, Debug)]
pub struct ContentConfig {
    /// Base URL of the store's REST API, including the base id segment.
    pub base_url: Url,
    /// Bearer token for authenticated bases.
    pub api_key: Option<String>,
    /// Table holding application records.
    pub apps_table: String,
    /// Table holding screen records.
    pub screens_table: String,
    /// Table holding documents.
    pub docs_table: String,
    /// Hard per-request timeout. List pages must render within this.
    pub timeout: Duration,
    /// Retries for 5xx/network failures.
    pub max_retries: u8,
    /// Base delay for exponential backoff between retries.
    pub retry_base_delay_ms: u64,
    /// Attach a cache-busting timestamp to list queries.
    pub cache_bust: bool,
}

impl ContentConfig {
    /// Build configuration from the environment.
    pub fn from_env() -> ContentResult<Self> {
        let raw = std::env::var(ENV_BASE_URL).map_err(|_| ContentError::InvalidResponse {
            message: format!("{ENV_BASE_URL} is not set"),
        })?;
        let base_url = Url::parse(&raw)?;

        Ok(Self {
            api_key: std::env::var(ENV_API_KEY).ok(),
            ..Self::for_base(base_url)
        })
    }

    /// Configuration for a specific base URL, defaults elsewhere.
    #[must_use]
    pub fn for_base(base_url: Url) -> Self {
        Self {
            base_url,
            api_key: None,
            apps_table: "Apps".to_string(),
            screens_table: "Screens".to_string(),
            docs_table: "Docs".to_string(),
            timeout: Duration::from_secs(10),
            max_retries: 2,
            retry_base_delay_ms: 500,
            cache_bust: true,
        }
    }
}
