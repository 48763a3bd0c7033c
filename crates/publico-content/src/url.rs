//! URL construction helpers for the content-store API.
//!
//! Pure functions building the per-table request URLs, keeping query
//! construction consistent across all API calls.

use crate::config::ContentConfig;
use publico_core::AppFilter;
use url::Url;

/// Join a table path onto the configured base.
fn table_url(config: &ContentConfig, table: &str) -> Url {
    let mut url = config.base_url.clone();
    let base_path = url.path().trim_end_matches('/');
    url.set_path(&format!("{base_path}/{table}"));
    url
}

/// Current wall-clock milliseconds, used as a cache-busting marker so list
/// responses are never served from a stale shared cache after a publish.
fn cache_bust_ts() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Build the list URL for the apps table, encoding the filter.
pub fn build_apps_url(config: &ContentConfig, filter: &AppFilter) -> Url {
    let mut url = table_url(config, &config.apps_table);

    {
        let mut pairs = url.query_pairs_mut();
        if let Some(kind) = filter.kind {
            pairs.append_pair("type", kind.as_str());
        }
        if let Some(platform) = filter.platform {
            pairs.append_pair("platform", platform.as_str());
        }
        if let Some(ref search) = filter.search {
            pairs.append_pair("search", search.trim());
        }
        if config.cache_bust {
            pairs.append_pair("ts", &cache_bust_ts().to_string());
        }
    }

    url
}

/// Build the URL for a single record.
pub fn build_record_url(config: &ContentConfig, table: &str, id: &str) -> Url {
    let mut url = table_url(config, table);
    let base_path = url.path().trim_end_matches('/');
    url.set_path(&format!("{base_path}/{}", urlencoding::encode(id)));
    url
}

/// Build the list URL for an app's screens.
pub fn build_screens_url(config: &ContentConfig, app_id: &str) -> Url {
    let mut url = table_url(config, &config.screens_table);
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("app", app_id);
        if config.cache_bust {
            pairs.append_pair("ts", &cache_bust_ts().to_string());
        }
    }
    url
}

/// Build the lookup URL for a document by title.
pub fn build_document_url(config: &ContentConfig, title: &str) -> Url {
    let mut url = table_url(config, &config.docs_table);
    url.query_pairs_mut().append_pair("title", title.trim());
    url
}
