//! Image URL normalization.
//!
//! Rewrites third-party CDN URLs into something the browser can safely
//! request: Cloudinary-hosted assets get an inline transformation segment,
//! expiring-link content stores get routed through the same-origin proxy,
//! and anything else passes through untouched. Pure functions; malformed
//! input falls back to manual string extraction and, failing that, to the
//! original URL.

use crate::transform::OutputFormat;

/// Host/prefix configuration for the normalizer.
#[derive(Clone, Debug)]
pub struct NormalizeConfig {
    /// Cloudinary delivery host.
    pub cloudinary_host: String,
    /// Hosts whose links expire and must be proxied. Matched by suffix, so
    /// `airtableusercontent.com` covers the versioned subdomains.
    pub content_hosts: Vec<String>,
    /// Same-origin proxy route prefix.
    pub proxy_prefix: String,
    /// Deploy-stamp appended as `v=` for cache busting across publishes.
    pub cache_tag: Option<String>,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            cloudinary_host: "res.cloudinary.com".to_string(),
            content_hosts: vec![
                "dl.airtable.com".to_string(),
                "airtableusercontent.com".to_string(),
            ],
            proxy_prefix: "/proxy-image".to_string(),
            cache_tag: None,
        }
    }
}

/// Transform knobs attached to a normalized URL.
#[derive(Clone, Debug, Default)]
pub struct NormalizeOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub format: Option<OutputFormat>,
    pub quality: Option<u8>,
}

/// Normalize an image URL for browser consumption.
///
/// `None` in, `None` out; unknown hosts come back unchanged. Never returns
/// an empty string for a non-empty input.
#[must_use]
pub fn normalize_image_url(
    raw: Option<&str>,
    opts: &NormalizeOptions,
    cfg: &NormalizeConfig,
) -> Option<String> {
    let raw = raw?;
    if raw.is_empty() {
        return Some(String::new());
    }

    match url::Url::parse(raw) {
        Ok(parsed) => {
            let Some(host) = parsed.host_str() else {
                return Some(raw.to_string());
            };
            if host == cfg.cloudinary_host {
                Some(rewrite_cloudinary(&parsed, opts).unwrap_or_else(|| raw.to_string()))
            } else if is_content_host(host, cfg) {
                Some(proxy_url(parsed.path(), opts, cfg))
            } else {
                Some(raw.to_string())
            }
        }
        // Parsing failed: fall back to manual path extraction
        Err(_) => Some(
            extract_content_path(raw, cfg)
                .map_or_else(|| raw.to_string(), |path| proxy_url(&path, opts, cfg)),
        ),
    }
}

/// Force a URL into its proxied form, regardless of host. Used by the
/// client retry progression after a direct load fails. Returns `None` when
/// no path can be extracted at all.
#[must_use]
pub fn force_proxy_url(
    raw: &str,
    opts: &NormalizeOptions,
    cfg: &NormalizeConfig,
) -> Option<String> {
    // Already under the proxy prefix: there is no further fallback
    if raw.starts_with(&format!("{}/", cfg.proxy_prefix)) {
        return None;
    }

    let path = match url::Url::parse(raw) {
        Ok(parsed) => {
            let path = parsed.path();
            if path.is_empty() || path == "/" {
                return None;
            }
            path.to_string()
        }
        Err(_) => manual_path(raw)?,
    };
    Some(proxy_url(&path, opts, cfg))
}

fn is_content_host(host: &str, cfg: &NormalizeConfig) -> bool {
    cfg.content_hosts
        .iter()
        .any(|h| host == h || host.ends_with(&format!(".{h}")))
}

/// Insert a transformation segment after Cloudinary's `upload` path part:
/// `/<cloud>/image/upload/c_limit,w_...,f_...,q_.../<rest>`.
fn rewrite_cloudinary(parsed: &url::Url, opts: &NormalizeOptions) -> Option<String> {
    let segments: Vec<&str> = parsed.path_segments()?.collect();
    let upload_idx = segments.iter().position(|s| *s == "upload")?;

    let mut parts = vec!["c_limit".to_string()];
    if let Some(w) = opts.width {
        parts.push(format!("w_{w}"));
    }
    if let Some(h) = opts.height {
        parts.push(format!("h_{h}"));
    }
    parts.push(format!(
        "f_{}",
        opts.format.map_or("auto", OutputFormat::as_str)
    ));
    parts.push(
        opts.quality
            .map_or_else(|| "q_auto".to_string(), |q| format!("q_{q}")),
    );

    let mut out_segments: Vec<String> = Vec::with_capacity(segments.len() + 1);
    out_segments.extend(segments[..=upload_idx].iter().map(ToString::to_string));
    out_segments.push(parts.join(","));
    out_segments.extend(segments[upload_idx + 1..].iter().map(ToString::to_string));

    Some(format!(
        "{}://{}/{}",
        parsed.scheme(),
        parsed.host_str()?,
        out_segments.join("/")
    ))
}

/// Build the same-origin proxy URL for an upstream path.
fn proxy_url(path: &str, opts: &NormalizeOptions, cfg: &NormalizeConfig) -> String {
    let mut query: Vec<String> = Vec::new();
    if let Some(w) = opts.width {
        query.push(format!("width={w}"));
    }
    if let Some(h) = opts.height {
        query.push(format!("height={h}"));
    }
    if let Some(f) = opts.format {
        query.push(format!("format={f}"));
    }
    if let Some(q) = opts.quality {
        query.push(format!("quality={q}"));
    }
    if let Some(ref tag) = cfg.cache_tag {
        query.push(format!("v={}", urlencoding::encode(tag)));
    }

    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };

    if query.is_empty() {
        format!("{}{path}", cfg.proxy_prefix)
    } else {
        format!("{}{path}?{}", cfg.proxy_prefix, query.join("&"))
    }
}

/// Manual fallback: find a known content host inside a string the URL
/// parser rejected and take everything after it up to the query.
fn extract_content_path(raw: &str, cfg: &NormalizeConfig) -> Option<String> {
    for host in &cfg.content_hosts {
        if let Some(idx) = raw.find(host.as_str()) {
            let after_host = &raw[idx + host.len()..];
            let path = after_host.split('?').next().unwrap_or("");
            if path.starts_with('/') && path.len() > 1 {
                return Some(path.to_string());
            }
        }
    }
    None
}

/// Manual path extraction for arbitrary unparseable URLs: strip scheme,
/// take from the first slash after the authority to the query.
fn manual_path(raw: &str) -> Option<String> {
    let rest = raw.split("://").nth(1).unwrap_or(raw);
    let slash = rest.find('/')?;
    let path = rest[slash..].split('?').next().unwrap_or("");
    if path.len() > 1 { Some(path.to_string()) } else { None }
}
