//! API response shapes.
//!
//! DTOs carry obfuscated ids and browser-ready image URLs: the normalized
//! direct URL plus the one proxied fallback the client walks to when the
//! direct load fails.

use publico_core::{AppKind, AppRecord, DocumentRecord, DocumentStatus, Platform, ScreenRecord};
use publico_imaging::{ImageSource, NormalizeConfig, NormalizeOptions, normalize_image_url};
use serde::Serialize;

/// Thumbnail width for gallery covers.
const COVER_WIDTH: u32 = 600;
/// Thumbnail width for screen images.
const SCREEN_WIDTH: u32 = 800;

/// An application as served by the API.
#[derive(Debug, Clone, Serialize)]
pub struct AppDto {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: AppKind,
    pub platforms: Vec<Platform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_fallback_url: Option<String>,
}

/// A screen as served by the API.
#[derive(Debug, Clone, Serialize)]
pub struct ScreenDto {
    pub id: String,
    pub title: String,
    pub order: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_url: Option<String>,
}

/// A document as served by the API.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentDto {
    pub id: String,
    pub title: String,
    pub content: String,
    pub status: DocumentStatus,
}

/// Normalized direct URL and its proxied fallback for one image.
fn image_urls(
    raw: Option<&str>,
    width: u32,
    cfg: &NormalizeConfig,
) -> (Option<String>, Option<String>) {
    let opts = NormalizeOptions {
        width: Some(width),
        ..NormalizeOptions::default()
    };
    let direct = normalize_image_url(raw, &opts, cfg);
    let fallback = direct.as_ref().and_then(|url| {
        ImageSource::direct(url.clone())
            .advance(&opts, cfg)
            .url()
            .map(str::to_string)
    });
    (direct, fallback)
}

/// Map a core app record to its API shape.
pub fn app_to_dto(
    app: &AppRecord,
    obfuscator: &publico_core::IdObfuscator,
    normalize: &NormalizeConfig,
) -> AppDto {
    let (cover_url, cover_fallback_url) = image_urls(app.cover_url.as_deref(), COVER_WIDTH, normalize);
    AppDto {
        id: obfuscator.public_id(&app.id),
        name: app.name.clone(),
        description: app.description.clone(),
        kind: app.kind,
        platforms: app.platforms.clone(),
        cover_url,
        cover_fallback_url,
    }
}

/// Map a core screen record to its API shape.
pub fn screen_to_dto(
    screen: &ScreenRecord,
    obfuscator: &publico_core::IdObfuscator,
    normalize: &NormalizeConfig,
) -> ScreenDto {
    let (image_url, fallback_url) = image_urls(screen.image_url.as_deref(), SCREEN_WIDTH, normalize);
    ScreenDto {
        id: obfuscator.public_id(&screen.id),
        title: screen.title.clone(),
        order: screen.order,
        image_url,
        fallback_url,
    }
}

/// Map a core document record to its API shape.
pub fn document_to_dto(
    doc: &DocumentRecord,
    obfuscator: &publico_core::IdObfuscator,
) -> DocumentDto {
    DocumentDto {
        id: obfuscator.public_id(&doc.id),
        title: doc.title.clone(),
        content: doc.content.clone(),
        status: doc.status,
    }
}
