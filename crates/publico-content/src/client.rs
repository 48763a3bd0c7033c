//! The content-store client - implements the core `ContentStore` port.

use crate::config::ContentConfig;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::parsing::{self, RawRecord, RawRecordList};
use crate::url as api_url;
use async_trait::async_trait;
use publico_core::{
    AppFilter, AppRecord, ContentStore, ContentStoreError, DocumentRecord, ScreenRecord,
};

/// Content-store client generic over its HTTP backend.
pub struct ContentStoreClient<B: HttpBackend> {
    config: ContentConfig,
    backend: B,
}

/// The production client type.
pub type DefaultContentClient = ContentStoreClient<ReqwestBackend>;

impl DefaultContentClient {
    /// Create a client with the production reqwest backend.
    #[must_use]
    pub fn new(config: &ContentConfig) -> Self {
        Self {
            backend: ReqwestBackend::new(config),
            config: config.clone(),
        }
    }
}

impl<B: HttpBackend> ContentStoreClient<B> {
    /// Create a client over an arbitrary backend (used by tests).
    pub fn with_backend(config: ContentConfig, backend: B) -> Self {
        Self { config, backend }
    }
}

#[async_trait]
impl<B: HttpBackend> ContentStore for ContentStoreClient<B> {
    async fn list_apps(&self, filter: &AppFilter) -> Result<Vec<AppRecord>, ContentStoreError> {
        let url = api_url::build_apps_url(&self.config, filter);
        let list: RawRecordList = self
            .backend
            .get_json(&url)
            .await
            .map_err(ContentStoreError::from)?;

        // Filter again locally: stores differ in which query params they honor
        Ok(list
            .records
            .iter()
            .filter_map(parsing::parse_app)
            .filter(|app| app.published && filter.matches(app))
            .collect())
    }

    async fn get_app(&self, id: &str) -> Result<AppRecord, ContentStoreError> {
        let url = api_url::build_record_url(&self.config, &self.config.apps_table, id);
        let record: RawRecord = self
            .backend
            .get_json(&url)
            .await
            .map_err(ContentStoreError::from)?;

        parsing::parse_app(&record)
            .ok_or_else(|| ContentStoreError::Malformed(format!("app record '{id}'")))
    }

    async fn list_screens(&self, app_id: &str) -> Result<Vec<ScreenRecord>, ContentStoreError> {
        let url = api_url::build_screens_url(&self.config, app_id);
        let list: RawRecordList = self
            .backend
            .get_json(&url)
            .await
            .map_err(ContentStoreError::from)?;

        Ok(list
            .records
            .iter()
            .filter_map(parsing::parse_screen)
            .filter(|screen| screen.app_id == app_id)
            .collect())
    }

    async fn get_document(&self, title: &str) -> Result<DocumentRecord, ContentStoreError> {
        let url = api_url::build_document_url(&self.config, title);
        let list: RawRecordList = self
            .backend
            .get_json(&url)
            .await
            .map_err(ContentStoreError::from)?;

        list.records
            .iter()
            .filter_map(parsing::parse_document)
            .find(|doc| doc.title.eq_ignore_ascii_case(title))
            .ok_or_else(|| ContentStoreError::NotFound(title.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::FakeBackend;
    use serde_json::json;
    use url::Url;

    fn config() -> ContentConfig {
        let mut config =
            ContentConfig::for_base(Url::parse("https://api.store.test/v0/base123/").unwrap());
        config.cache_bust = false;
        config
    }

    fn client(backend: FakeBackend) -> ContentStoreClient<FakeBackend> {
        ContentStoreClient::with_backend(config(), backend)
    }

    #[tokio::test]
    async fn test_list_apps_skips_malformed_and_unpublished() {
        let backend = FakeBackend::new().with_response(
            "Apps",
            json!({"records": [
                {"id": "rec1", "fields": {"name": "Gov App", "type": "app", "published": true}},
                {"id": "rec2", "fields": {"name": "No Type"}},
                {"id": "rec3", "fields": {"name": "Draft", "type": "site", "published": false}}
            ]}),
        );

        let apps = client(backend).list_apps(&AppFilter::default()).await.unwrap();
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].id, "rec1");
    }

    #[tokio::test]
    async fn test_get_app_not_found_maps_to_port_error() {
        let backend = FakeBackend::new();
        let result = client(backend).get_app("recMissing").await;
        assert!(matches!(result, Err(ContentStoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_document_by_title_case_insensitive() {
        let backend = FakeBackend::new().with_response(
            "Docs",
            json!({"records": [
                {"id": "doc1", "fields": {"title": "Sobre", "content": "# Sobre", "status": "published"}}
            ]}),
        );

        let doc = client(backend).get_document("sobre").await.unwrap();
        assert_eq!(doc.id, "doc1");
    }

    #[tokio::test]
    async fn test_list_screens_drops_foreign_records() {
        let backend = FakeBackend::new().with_response(
            "Screens",
            json!({"records": [
                {"id": "s1", "fields": {"app": ["recA"], "title": "Home", "order": 1}},
                {"id": "s2", "fields": {"app": ["recB"], "title": "Other", "order": 1}}
            ]}),
        );

        let screens = client(backend).list_screens("recA").await.unwrap();
        assert_eq!(screens.len(), 1);
        assert_eq!(screens[0].id, "s1");
    }
}
