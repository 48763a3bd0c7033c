//! Application records and list filtering.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Broad category of a cataloged application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppKind {
    /// Public-facing website.
    Site,
    /// Installable mobile application.
    App,
    /// Digital service (forms, portals, back-office flows).
    Service,
}

impl AppKind {
    /// Stable lowercase name, matching the query-parameter vocabulary.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Site => "site",
            Self::App => "app",
            Self::Service => "service",
        }
    }
}

impl fmt::Display for AppKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "site" => Ok(Self::Site),
            "app" => Ok(Self::App),
            "service" => Ok(Self::Service),
            other => Err(format!("unknown app type '{other}'")),
        }
    }
}

/// Platform an application is available on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Web,
    Ios,
    Android,
}

impl Platform {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Ios => "ios",
            Self::Android => "android",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "web" => Ok(Self::Web),
            "ios" => Ok(Self::Ios),
            "android" => Ok(Self::Android),
            other => Err(format!("unknown platform '{other}'")),
        }
    }
}

/// A cataloged public-sector application.
///
/// `id` is the content-store record id and is unique across the catalog.
/// It never appears in public responses directly; the obfuscator issues the
/// public token.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppRecord {
    /// Content-store record id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short description (may be empty).
    #[serde(default)]
    pub description: String,
    /// Category.
    pub kind: AppKind,
    /// Platforms the app ships on.
    #[serde(default)]
    pub platforms: Vec<Platform>,
    /// Cover image URL as stored upstream.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    /// Manual ordering weight within the gallery.
    #[serde(default)]
    pub order: i64,
    /// Whether the record is published.
    #[serde(default)]
    pub published: bool,
}

/// Filter for listing applications.
#[derive(Clone, Debug, Default)]
pub struct AppFilter {
    /// Restrict to a single category.
    pub kind: Option<AppKind>,
    /// Restrict to apps available on a platform.
    pub platform: Option<Platform>,
    /// Case-insensitive substring match on name or description.
    pub search: Option<String>,
}

impl AppFilter {
    /// Check whether a record passes the filter.
    #[must_use]
    pub fn matches(&self, app: &AppRecord) -> bool {
        if let Some(kind) = self.kind {
            if app.kind != kind {
                return false;
            }
        }
        if let Some(platform) = self.platform {
            if !app.platforms.contains(&platform) {
                return false;
            }
        }
        if let Some(ref search) = self.search {
            let needle = search.to_lowercase();
            if !app.name.to_lowercase().contains(&needle)
                && !app.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }

    /// True when no criteria are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.platform.is_none() && self.search.is_none()
    }
}
