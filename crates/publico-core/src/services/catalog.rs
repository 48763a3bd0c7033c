//! Catalog read service.
//!
//! List reads degrade gracefully: any content-store failure is logged and
//! answered with an empty collection, so gallery pages render a fallback
//! state instead of an error. Single-entity reads propagate, so callers can
//! distinguish "missing" from "store down".

use crate::domain::{AppFilter, AppRecord, DocumentRecord, ScreenRecord};
use crate::error::{CoreError, CoreResult};
use crate::ports::{ContentStore, ContentStoreError};
use std::sync::Arc;

/// Read-side facade over the content store.
pub struct CatalogService {
    store: Arc<dyn ContentStore>,
}

impl CatalogService {
    /// Create a service over the given store.
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// List applications matching the filter, sorted by name ascending.
    ///
    /// Returns an empty list when the store fails.
    pub async fn list_apps(&self, filter: &AppFilter) -> Vec<AppRecord> {
        match self.store.list_apps(filter).await {
            Ok(mut apps) => {
                apps.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
                apps
            }
            Err(e) => {
                tracing::warn!("Listing apps failed, serving empty catalog: {e}");
                Vec::new()
            }
        }
    }

    /// Fetch one application by record id.
    pub async fn get_app(&self, id: &str) -> CoreResult<AppRecord> {
        self.store.get_app(id).await.map_err(map_single_read)
    }

    /// List an application's screens, sorted by `order` ascending.
    ///
    /// Returns an empty list when the store fails.
    pub async fn app_screens(&self, app_id: &str) -> Vec<ScreenRecord> {
        match self.store.list_screens(app_id).await {
            Ok(mut screens) => {
                screens.sort_by_key(|s| s.order);
                screens
            }
            Err(e) => {
                tracing::warn!(app_id, "Listing screens failed, serving empty list: {e}");
                Vec::new()
            }
        }
    }

    /// Fetch a document by its unique title.
    pub async fn get_document(&self, title: &str) -> CoreResult<DocumentRecord> {
        self.store.get_document(title).await.map_err(map_single_read)
    }
}

/// Single-entity reads turn upstream "missing" into `NotFound` and keep the
/// rest of the taxonomy intact.
fn map_single_read(err: ContentStoreError) -> CoreError {
    match err {
        ContentStoreError::NotFound(id) => CoreError::NotFound(id),
        other => CoreError::Content(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AppKind;
    use async_trait::async_trait;

    /// Store fake: serves canned records, or fails everything.
    struct FakeStore {
        apps: Vec<AppRecord>,
        screens: Vec<ScreenRecord>,
        failing: bool,
    }

    impl FakeStore {
        fn with_apps(apps: Vec<AppRecord>) -> Self {
            Self {
                apps,
                screens: Vec::new(),
                failing: false,
            }
        }

        fn failing() -> Self {
            Self {
                apps: Vec::new(),
                screens: Vec::new(),
                failing: true,
            }
        }
    }

    #[async_trait]
    impl ContentStore for FakeStore {
        async fn list_apps(
            &self,
            filter: &AppFilter,
        ) -> Result<Vec<AppRecord>, ContentStoreError> {
            if self.failing {
                return Err(ContentStoreError::Unavailable("boom".to_string()));
            }
            Ok(self
                .apps
                .iter()
                .filter(|a| filter.matches(a))
                .cloned()
                .collect())
        }

        async fn get_app(&self, id: &str) -> Result<AppRecord, ContentStoreError> {
            if self.failing {
                return Err(ContentStoreError::Unavailable("boom".to_string()));
            }
            self.apps
                .iter()
                .find(|a| a.id == id)
                .cloned()
                .ok_or_else(|| ContentStoreError::NotFound(id.to_string()))
        }

        async fn list_screens(
            &self,
            _app_id: &str,
        ) -> Result<Vec<ScreenRecord>, ContentStoreError> {
            if self.failing {
                return Err(ContentStoreError::Unavailable("boom".to_string()));
            }
            Ok(self.screens.clone())
        }

        async fn get_document(&self, title: &str) -> Result<DocumentRecord, ContentStoreError> {
            Err(ContentStoreError::NotFound(title.to_string()))
        }
    }

    fn app(id: &str, name: &str) -> AppRecord {
        AppRecord {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            kind: AppKind::App,
            platforms: Vec::new(),
            cover_url: None,
            order: 0,
            published: true,
        }
    }

    #[tokio::test]
    async fn test_list_apps_sorted_by_name() {
        let store = FakeStore::with_apps(vec![app("b", "zeta"), app("a", "Alfa")]);
        let service = CatalogService::new(Arc::new(store));

        let apps = service.list_apps(&AppFilter::default()).await;
        assert_eq!(apps.len(), 2);
        assert_eq!(apps[0].name, "Alfa");
        assert_eq!(apps[1].name, "zeta");
    }

    #[tokio::test]
    async fn test_list_apps_degrades_to_empty() {
        let service = CatalogService::new(Arc::new(FakeStore::failing()));
        assert!(service.list_apps(&AppFilter::default()).await.is_empty());
    }

    #[tokio::test]
    async fn test_get_app_propagates_not_found() {
        let store = FakeStore::with_apps(vec![app("a", "Alfa")]);
        let service = CatalogService::new(Arc::new(store));

        assert!(service.get_app("a").await.is_ok());
        assert!(matches!(
            service.get_app("missing").await,
            Err(CoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_get_app_propagates_unavailable() {
        let service = CatalogService::new(Arc::new(FakeStore::failing()));
        assert!(matches!(
            service.get_app("a").await,
            Err(CoreError::Content(ContentStoreError::Unavailable(_)))
        ));
    }

    #[tokio::test]
    async fn test_screens_sorted_by_order() {
        let mut store = FakeStore::with_apps(vec![]);
        store.screens = vec![
            ScreenRecord {
                id: "s2".to_string(),
                app_id: "a".to_string(),
                title: "second".to_string(),
                image_url: None,
                order: 2,
            },
            ScreenRecord {
                id: "s1".to_string(),
                app_id: "a".to_string(),
                title: "first".to_string(),
                image_url: None,
                order: 1,
            },
        ];
        let service = CatalogService::new(Arc::new(store));

        let screens = service.app_screens("a").await;
        assert_eq!(screens[0].id, "s1");
        assert_eq!(screens[1].id, "s2");
    }
}
