//! Integration tests for the content API routes.
//!
//! These tests exercise the full router against an in-memory content store.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use common::{FakeFetcher, FakeStore, test_context};
use publico_axum::bootstrap::CorsConfig;
use publico_axum::routes::create_router;

fn app_router(store: FakeStore) -> axum::Router {
    let ctx = test_context(store, FakeFetcher::serving(Vec::new(), "image/png"));
    create_router(ctx, &CorsConfig::AllowAll)
}

async fn get_json(router: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let response = app_router(FakeStore::with_fixtures())
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn apps_list_is_sorted_by_name() {
    let (status, json) = get_json(app_router(FakeStore::with_fixtures()), "/api/apps").await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Carteira Digital", "Meu INSS", "Portal Gov"]);
}

#[tokio::test]
async fn apps_list_filters_by_type() {
    let (status, json) =
        get_json(app_router(FakeStore::with_fixtures()), "/api/apps?type=site").await;

    assert_eq!(status, StatusCode::OK);
    let apps = json.as_array().unwrap();
    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0]["name"], "Portal Gov");
    assert_eq!(apps[0]["type"], "site");
}

#[tokio::test]
async fn apps_list_rejects_unknown_type() {
    let (status, json) =
        get_json(app_router(FakeStore::with_fixtures()), "/api/apps?type=cli").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);
    assert!(json["error"].as_str().unwrap().contains("cli"));
}

#[tokio::test]
async fn apps_list_degrades_to_empty_when_store_is_down() {
    let (status, json) = get_json(app_router(FakeStore::unavailable()), "/api/apps").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!([]));
}

#[tokio::test]
async fn app_detail_resolves_obfuscated_id() {
    let ctx = test_context(
        FakeStore::with_fixtures(),
        FakeFetcher::serving(Vec::new(), "image/png"),
    );
    let public_id = ctx.obfuscator.public_id("recA");
    let router = create_router(ctx, &CorsConfig::AllowAll);

    let (status, json) = get_json(router, &format!("/api/apps/{public_id}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Carteira Digital");
    // The raw record id never appears in the payload
    assert_ne!(json["id"], "recA");
}

#[tokio::test]
async fn unknown_app_returns_404_body() {
    let (status, json) = get_json(
        app_router(FakeStore::with_fixtures()),
        "/api/apps/recMissing",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], 404);
    assert!(json["error"].as_str().is_some());
}

#[tokio::test]
async fn screens_are_sorted_by_order() {
    let ctx = test_context(
        FakeStore::with_fixtures(),
        FakeFetcher::serving(Vec::new(), "image/png"),
    );
    let public_id = ctx.obfuscator.public_id("recA");
    let router = create_router(ctx, &CorsConfig::AllowAll);

    let (status, json) = get_json(router, &format!("/api/apps/{public_id}/screens")).await;

    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Login", "Home"]);
}

#[tokio::test]
async fn screens_carry_proxied_image_urls() {
    let ctx = test_context(
        FakeStore::with_fixtures(),
        FakeFetcher::serving(Vec::new(), "image/png"),
    );
    let public_id = ctx.obfuscator.public_id("recA");
    let router = create_router(ctx, &CorsConfig::AllowAll);

    let (_, json) = get_json(router, &format!("/api/apps/{public_id}/screens")).await;

    let image_url = json[0]["image_url"].as_str().unwrap();
    assert!(
        image_url.starts_with("/proxy-image/shots/s.png"),
        "expiring-host URL should be proxied, got {image_url}"
    );
}

#[tokio::test]
async fn document_found_by_title_case_insensitive() {
    let (status, json) = get_json(app_router(FakeStore::with_fixtures()), "/api/docs/Sobre").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "sobre");
    assert_eq!(json["content"], "# Sobre");
    assert_eq!(json["status"], "published");
}

#[tokio::test]
async fn unknown_document_returns_404() {
    let (status, _) = get_json(app_router(FakeStore::with_fixtures()), "/api/docs/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
