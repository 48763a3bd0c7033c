//! Transform parameter resolution.
//!
//! Incoming proxy requests carry raw width/height/format/quality knobs.
//! Resolution applies the width clamp, the wide-request bandwidth guard,
//! `Accept`-based format negotiation and per-format quality caps, producing
//! the exact parameter tuple the pipeline and the cache validator work from.

use crate::error::{ImagingError, ImagingResult};
use std::fmt;
use std::str::FromStr;

/// Hard cap on requested width.
pub const MAX_WIDTH: u32 = 1000;
/// Requests wider than this also get their quality pulled down.
pub const WIDE_REQUEST_THRESHOLD: u32 = 1500;
/// Quality when the caller does not specify one.
pub const DEFAULT_QUALITY: u8 = 80;
/// Quality applied to wide requests that asked for more.
const WIDE_REQUEST_QUALITY: u8 = 75;
/// AVIF stays visually fine well below JPEG-equivalent quality numbers.
pub const AVIF_MAX_QUALITY: u8 = 70;
/// WebP quality cap.
pub const WEBP_MAX_QUALITY: u8 = 80;

/// Output format of a proxied image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Avif,
    Webp,
    Jpeg,
    Png,
    /// Keep the upstream container.
    Original,
}

impl OutputFormat {
    /// Stable lowercase name, used in validators and Cloudinary segments.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Avif => "avif",
            Self::Webp => "webp",
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Original => "orig",
        }
    }

    /// MIME type for transcoded output. `Original` has no fixed type; the
    /// upstream content type is passed through instead.
    #[must_use]
    pub const fn content_type(self) -> Option<&'static str> {
        match self {
            Self::Avif => Some("image/avif"),
            Self::Webp => Some("image/webp"),
            Self::Jpeg => Some("image/jpeg"),
            Self::Png => Some("image/png"),
            Self::Original => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "avif" => Ok(Self::Avif),
            "webp" => Ok(Self::Webp),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "original" | "orig" => Ok(Self::Original),
            other => Err(format!("unknown image format '{other}'")),
        }
    }
}

/// Raw transform request as derived from the incoming HTTP request.
///
/// `format: None` means "auto": negotiate from the `Accept` header when
/// processing happens at all.
#[derive(Clone, Debug, Default)]
pub struct TransformRequest {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub format: Option<OutputFormat>,
    pub quality: Option<u8>,
}

/// Fully resolved parameters - the cache key and the pipeline input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedTransform {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub format: OutputFormat,
    pub quality: u8,
}

impl ResolvedTransform {
    /// Whether the upstream bytes go through decode/re-encode at all.
    /// With no transform parameters the original bytes pass through.
    #[must_use]
    pub const fn requires_processing(&self) -> bool {
        self.width.is_some() || self.height.is_some() || !matches!(self.format, OutputFormat::Original)
    }
}

/// Resolve raw parameters against the client's `Accept` header.
pub fn resolve(req: &TransformRequest, accept: Option<&str>) -> ImagingResult<ResolvedTransform> {
    if let Some(q) = req.quality {
        if q == 0 || q > 100 {
            return Err(ImagingError::InvalidQuality(q));
        }
    }
    let mut quality = req.quality.unwrap_or(DEFAULT_QUALITY);

    // Bandwidth guard: a request that wanted a very wide image gets both the
    // clamp and a quality reduction
    if req.width.is_some_and(|w| w > WIDE_REQUEST_THRESHOLD) && quality > WIDE_REQUEST_QUALITY {
        quality = WIDE_REQUEST_QUALITY;
    }

    let width = req.width.map(|w| w.min(MAX_WIDTH));
    let has_resize = width.is_some() || req.height.is_some();

    let format = match req.format {
        Some(explicit) => explicit,
        None if has_resize => negotiate(accept),
        None => OutputFormat::Original,
    };

    // Per-format caps apply even when the caller asked for higher
    quality = match format {
        OutputFormat::Avif => quality.min(AVIF_MAX_QUALITY),
        OutputFormat::Webp => quality.min(WEBP_MAX_QUALITY),
        _ => quality,
    };

    Ok(ResolvedTransform {
        width,
        height: req.height,
        format,
        quality,
    })
}

/// Pick the best format the client advertises: AVIF, then WebP, then the
/// JPEG fallback every client can decode.
fn negotiate(accept: Option<&str>) -> OutputFormat {
    let accept = accept.unwrap_or("");
    if accept.contains("image/avif") {
        OutputFormat::Avif
    } else if accept.contains("image/webp") {
        OutputFormat::Webp
    } else {
        OutputFormat::Jpeg
    }
}
