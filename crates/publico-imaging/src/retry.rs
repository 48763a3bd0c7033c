//! Image-load retry progression.
//!
//! When a direct CDN load fails in the browser (expired link, blocked
//! host), the client gets exactly one fallback: the same image through the
//! same-origin proxy. This models that as an explicit state machine instead
//! of ad-hoc URL rewriting: `Direct → Proxied → Failed`.

use crate::normalize::{NormalizeConfig, NormalizeOptions, force_proxy_url};

/// Where the next load attempt for an image should go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSource {
    /// First attempt: the URL as normalized for direct loading.
    Direct(String),
    /// Second attempt: forced through the same-origin proxy.
    Proxied(String),
    /// No attempts left; show the broken-image placeholder.
    Failed,
}

impl ImageSource {
    /// Start the progression at a direct URL.
    pub fn direct(url: impl Into<String>) -> Self {
        Self::Direct(url.into())
    }

    /// URL for the current attempt, if any.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Direct(url) | Self::Proxied(url) => Some(url),
            Self::Failed => None,
        }
    }

    /// Consume a load failure and move to the next attempt.
    #[must_use]
    pub fn advance(self, opts: &NormalizeOptions, cfg: &NormalizeConfig) -> Self {
        match self {
            Self::Direct(url) => match force_proxy_url(&url, opts, cfg) {
                // A direct URL that already was the proxy path has no
                // second chance
                Some(proxied) if proxied != url => Self::Proxied(proxied),
                _ => Self::Failed,
            },
            Self::Proxied(_) | Self::Failed => Self::Failed,
        }
    }
}
