//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the web adapter. All concrete implementations are instantiated here;
//! everything downstream sees ports and shared state.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

use publico_content::{ContentConfig, DefaultContentClient};
use publico_core::{CatalogService, IdObfuscator};
use publico_imaging::{AdmissionQueue, NormalizeConfig, ReqwestFetcher, UpstreamFetcher};

/// Default upstream host for mirrored attachment content.
const DEFAULT_UPSTREAM_IMAGE_BASE: &str = "https://v5.airtableusercontent.com/";

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the HTTP server.
    pub port: u16,
    /// Optional path to static assets for SPA serving.
    pub static_dir: Option<PathBuf>,
    /// CORS configuration.
    pub cors: CorsConfig,
    /// Maximum concurrent image transforms.
    pub max_concurrent: usize,
    /// Delay before a freed transform slot is handed to the next waiter.
    pub release_delay_ms: u64,
    /// Timeout for a single upstream image fetch.
    pub fetch_timeout_secs: u64,
    /// Base URL the proxy fetches mirrored images from.
    pub upstream_image_base: Url,
    /// Content store client configuration.
    pub content: ContentConfig,
    /// Image URL normalization rules.
    pub normalize: NormalizeConfig,
}

impl ServerConfig {
    /// Build configuration from the environment.
    pub fn from_env() -> Result<Self> {
        let content = ContentConfig::from_env().context("content store configuration")?;

        let upstream_image_base = match std::env::var("PUBLICO_UPSTREAM_IMAGE_BASE") {
            Ok(raw) => Url::parse(&raw).context("PUBLICO_UPSTREAM_IMAGE_BASE")?,
            Err(_) => Url::parse(DEFAULT_UPSTREAM_IMAGE_BASE)?,
        };

        let mut normalize = NormalizeConfig {
            cache_tag: std::env::var("PUBLICO_CACHE_TAG").ok(),
            ..NormalizeConfig::default()
        };
        if let Ok(host) = std::env::var("PUBLICO_CLOUDINARY_HOST") {
            normalize.cloudinary_host = host;
        }

        let port = std::env::var("PUBLICO_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(9280);

        Ok(Self {
            port,
            static_dir: None,
            cors: CorsConfig::default(),
            max_concurrent: 5,
            release_delay_ms: 50,
            fetch_timeout_secs: 15,
            upstream_image_base,
            content,
            normalize,
        })
    }

    /// Set the static directory for SPA serving.
    #[must_use]
    pub fn with_static_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(path.into());
        self
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }
}

/// Application context for the Axum adapter.
///
/// Fields are public so integration tests can assemble a context with fakes
/// in place of the network-facing pieces.
pub struct AxumContext {
    /// Catalog reads over the content store.
    pub catalog: CatalogService,
    /// Public-id mapping for record ids.
    pub obfuscator: IdObfuscator,
    /// Bounded-concurrency admission for image transforms.
    pub queue: Arc<AdmissionQueue>,
    /// Upstream image fetcher.
    pub fetcher: Arc<dyn UpstreamFetcher>,
    /// Image URL normalization rules.
    pub normalize: NormalizeConfig,
}

/// Bootstrap the Axum server with all services.
pub fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    tracing::info!(
        target: "publico.bootstrap",
        port = config.port,
        content_base = %config.content.base_url,
        upstream_image_base = %config.upstream_image_base,
        max_concurrent = config.max_concurrent,
        release_delay_ms = config.release_delay_ms,
        "bootstrapping services"
    );

    let store = Arc::new(DefaultContentClient::new(&config.content));
    let catalog = CatalogService::new(store);

    let queue = AdmissionQueue::new(
        config.max_concurrent,
        Duration::from_millis(config.release_delay_ms),
    );
    let fetcher: Arc<dyn UpstreamFetcher> = Arc::new(ReqwestFetcher::new(
        config.upstream_image_base.clone(),
        Duration::from_secs(config.fetch_timeout_secs),
    ));

    Ok(AxumContext {
        catalog,
        obfuscator: IdObfuscator::new(),
        queue,
        fetcher,
        normalize: config.normalize.clone(),
    })
}

/// Start the web server on the configured port.
///
/// If `config.static_dir` is set, serves static assets with SPA fallback.
/// Otherwise, serves only the API endpoints.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;
    use tracing::info;

    let ctx = bootstrap(&config)?;

    let app = if let Some(ref static_dir) = config.static_dir {
        info!("Serving static assets from: {}", static_dir.display());
        crate::routes::create_spa_router(ctx, static_dir, &config.cors)
    } else {
        crate::routes::create_router(ctx, &config.cors)
    };

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;

    if config.static_dir.is_some() {
        info!("publico server (with UI) listening on http://{addr}");
    } else {
        info!("publico server (API only) listening on http://{addr}");
    }

    axum::serve(listener, app).await?;
    Ok(())
}
