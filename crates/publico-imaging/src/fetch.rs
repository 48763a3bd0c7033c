//! Upstream image fetching.
//!
//! A small port so the proxy handler can be tested without a network. The
//! production implementation is reqwest with an explicit per-request
//! timeout; the upstream host enforces nothing usable on its own.

use crate::error::{ImagingError, ImagingResult};
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// Default timeout for a single upstream fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Raw bytes fetched from the upstream CDN.
#[derive(Clone, Debug)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    /// Upstream `Content-Type`, passed through on untransformed responses.
    pub content_type: Option<String>,
}

/// Fetch an upstream image by its mirrored path.
#[async_trait]
pub trait UpstreamFetcher: Send + Sync {
    async fn fetch(&self, path: &str) -> ImagingResult<FetchedImage>;
}

/// Production fetcher joining proxied paths onto a fixed upstream base.
pub struct ReqwestFetcher {
    client: reqwest::Client,
    base_url: Url,
}

impl ReqwestFetcher {
    /// Create a fetcher for the given upstream base.
    #[must_use]
    pub fn new(mut base_url: Url, timeout: Duration) -> Self {
        // Url::join drops the last segment unless the base ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to create HTTP client");

        Self { client, base_url }
    }
}

#[async_trait]
impl UpstreamFetcher for ReqwestFetcher {
    async fn fetch(&self, path: &str) -> ImagingResult<FetchedImage> {
        let url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ImagingError::InvalidPath(format!("{path}: {e}")))?;

        let response = self.client.get(url.as_str()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ImagingError::Upstream {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response.bytes().await?;
        Ok(FetchedImage {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}
