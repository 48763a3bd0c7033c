//! Image proxy handler.
//!
//! Mirrors upstream CDN images under a stable URL, optionally resizing and
//! transcoding on the fly. Responses carry long-lived immutable cache
//! headers plus a deterministic ETag over the resolved parameters, so both
//! browsers and CDN edges revalidate with `If-None-Match` instead of
//! refetching. Processing capacity is bounded by a FIFO admission queue.

use axum::extract::{Path, Query, State};
use axum::http::header::{self, HeaderMap, HeaderValue};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::error::HttpError;
use crate::state::AppState;
use publico_imaging::{
    compute_validator, process, resolve, ImagingError, OutputFormat, TransformRequest,
};

/// One-year immutable cache policy, matched to the versioned proxy URLs.
const CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// Transform knobs accepted on the proxy URL.
#[derive(Debug, Default, Deserialize)]
pub struct ProxyQuery {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub format: Option<String>,
    pub quality: Option<u8>,
    /// Cache-busting tag, part of the URL identity only.
    #[serde(rename = "v")]
    pub _version: Option<String>,
}

impl ProxyQuery {
    fn into_transform(self) -> Result<TransformRequest, HttpError> {
        let format = match self.format.as_deref() {
            None | Some("") | Some("auto") => None,
            Some(explicit) => Some(
                explicit
                    .parse::<OutputFormat>()
                    .map_err(HttpError::BadRequest)?,
            ),
        };
        Ok(TransformRequest {
            width: self.width,
            height: self.height,
            format,
            quality: self.quality,
        })
    }
}

/// Serve a proxied image, transformed when parameters say so.
pub async fn serve(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(query): Query<ProxyQuery>,
    headers: HeaderMap,
) -> Result<Response, HttpError> {
    // Wildcard captures strip the leading slash; upstream paths keep it
    let upstream_path = format!("/{path}");

    let request = query.into_transform()?;
    let accept = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok());
    let resolved = resolve(&request, accept).map_err(|e| match e {
        ImagingError::InvalidQuality(_) => HttpError::BadRequest(e.to_string()),
        other => HttpError::Internal(other.to_string()),
    })?;

    let etag = compute_validator(&upstream_path, &resolved);

    // Conditional revalidation: matched validators skip fetch and transform
    if let Some(candidate) = headers.get(header::IF_NONE_MATCH).and_then(|v| v.to_str().ok()) {
        if candidate == etag {
            return Ok(not_modified(&etag));
        }
    }

    // Slot held until the handler returns, releasing after the delay window
    let _slot = state
        .queue
        .acquire()
        .await
        .map_err(|e| HttpError::Internal(e.to_string()))?;

    let fetched = state.fetcher.fetch(&upstream_path).await.map_err(|e| {
        tracing::error!(path = %upstream_path, error = %e, "upstream image fetch failed");
        HttpError::BadGateway {
            path: upstream_path.clone(),
            message: e.to_string(),
        }
    })?;

    let (bytes, content_type) = if resolved.requires_processing() {
        let processed = process(&fetched.bytes, &resolved).map_err(|e| {
            tracing::error!(path = %upstream_path, error = %e, "image processing failed");
            HttpError::ProcessingFailed {
                path: upstream_path.clone(),
                message: e.to_string(),
            }
        })?;
        (processed.bytes, processed.content_type.to_string())
    } else {
        let content_type = fetched
            .content_type
            .unwrap_or_else(|| "application/octet-stream".to_string());
        (fetched.bytes, content_type)
    };

    let mut response = (StatusCode::OK, bytes).into_response();
    apply_cache_headers(response.headers_mut(), &etag);
    if let Ok(value) = HeaderValue::from_str(&content_type) {
        response.headers_mut().insert(header::CONTENT_TYPE, value);
    }
    Ok(response)
}

fn not_modified(etag: &str) -> Response {
    let mut response = StatusCode::NOT_MODIFIED.into_response();
    apply_cache_headers(response.headers_mut(), etag);
    response
}

fn apply_cache_headers(headers: &mut HeaderMap, etag: &str) {
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL));
    headers.insert(header::VARY, HeaderValue::from_static("Accept"));
    if let Ok(value) = HeaderValue::from_str(etag) {
        headers.insert(header::ETAG, value);
    }
}
