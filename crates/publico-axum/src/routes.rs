//! Route definitions and router construction.
//!
//! The content API nests under `/api`; the image proxy sits at the root so
//! proxied URLs stay short and CDN-cacheable.

use axum::Router;
use axum::routing::get;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

use crate::bootstrap::{AxumContext, CorsConfig};
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            use axum::http::HeaderValue;
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// Content API routes without the `/api` prefix (the caller nests them).
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/apps", get(handlers::apps::list))
        .route("/apps/{id}", get(handlers::apps::get))
        .route("/apps/{id}/screens", get(handlers::apps::screens))
        .route("/docs/{title}", get(handlers::docs::get))
}

/// Create the main Axum router with the API and the image proxy.
///
/// Axum 0.8 uses brace syntax for path parameters: `{id}`, `{*path}`.
pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig) -> Router {
    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(cors_config);

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/proxy-image/{*path}",
            get(handlers::proxy_image::serve).with_state(state.clone()),
        )
        .nest("/api", api_routes().with_state(state).layer(cors))
}

/// Create a router with API routes and static asset serving.
///
/// Serves built frontend assets from `static_dir`, falling back to
/// `index.html` for client-side routing. API routes take priority.
pub fn create_spa_router<P: AsRef<Path>>(
    ctx: AxumContext,
    static_dir: P,
    cors_config: &CorsConfig,
) -> Router {
    let static_path = static_dir.as_ref();
    let index_path = static_path.join("index.html");

    let serve_dir = ServeDir::new(static_path).fallback(ServeFile::new(&index_path));

    let api = create_router(ctx, cors_config);
    api.fallback_service(serve_dir)
}

/// Health check endpoint.
pub(crate) async fn health_check() -> &'static str {
    "OK"
}
