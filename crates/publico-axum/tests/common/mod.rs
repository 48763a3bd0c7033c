//! Shared fakes for the integration test suites.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;

use publico_axum::bootstrap::AxumContext;
use publico_core::{
    AppFilter, AppKind, AppRecord, CatalogService, ContentStore, ContentStoreError,
    DocumentRecord, DocumentStatus, IdObfuscator, Platform, ScreenRecord,
};
use publico_imaging::{
    AdmissionQueue, FetchedImage, ImagingError, ImagingResult, NormalizeConfig, UpstreamFetcher,
};

/// In-memory content store serving fixed records.
pub struct FakeStore {
    pub apps: Vec<AppRecord>,
    pub screens: Vec<ScreenRecord>,
    pub documents: Vec<DocumentRecord>,
    /// When set, every call fails with `Unavailable`.
    pub unavailable: bool,
}

impl FakeStore {
    pub fn with_fixtures() -> Self {
        Self {
            apps: vec![
                app("recB", "Meu INSS", AppKind::App),
                app("recA", "Carteira Digital", AppKind::App),
                app("recC", "Portal Gov", AppKind::Site),
            ],
            screens: vec![
                screen("scr2", "recA", "Home", 2),
                screen("scr1", "recA", "Login", 1),
            ],
            documents: vec![DocumentRecord {
                id: "doc1".to_string(),
                title: "sobre".to_string(),
                content: "# Sobre".to_string(),
                status: DocumentStatus::Published,
            }],
            unavailable: false,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            apps: Vec::new(),
            screens: Vec::new(),
            documents: Vec::new(),
            unavailable: true,
        }
    }

    fn check(&self) -> Result<(), ContentStoreError> {
        if self.unavailable {
            Err(ContentStoreError::Unavailable("store down".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ContentStore for FakeStore {
    async fn list_apps(&self, filter: &AppFilter) -> Result<Vec<AppRecord>, ContentStoreError> {
        self.check()?;
        Ok(self
            .apps
            .iter()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect())
    }

    async fn get_app(&self, id: &str) -> Result<AppRecord, ContentStoreError> {
        self.check()?;
        self.apps
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| ContentStoreError::NotFound(id.to_string()))
    }

    async fn list_screens(&self, app_id: &str) -> Result<Vec<ScreenRecord>, ContentStoreError> {
        self.check()?;
        Ok(self
            .screens
            .iter()
            .filter(|s| s.app_id == app_id)
            .cloned()
            .collect())
    }

    async fn get_document(&self, title: &str) -> Result<DocumentRecord, ContentStoreError> {
        self.check()?;
        self.documents
            .iter()
            .find(|d| d.title.eq_ignore_ascii_case(title))
            .cloned()
            .ok_or_else(|| ContentStoreError::NotFound(title.to_string()))
    }
}

fn app(id: &str, name: &str, kind: AppKind) -> AppRecord {
    AppRecord {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("{name} description"),
        kind,
        platforms: vec![Platform::Web],
        cover_url: Some("https://dl.airtable.com/covers/a.png".to_string()),
        order: 0,
        published: true,
    }
}

fn screen(id: &str, app_id: &str, title: &str, order: i64) -> ScreenRecord {
    ScreenRecord {
        id: id.to_string(),
        app_id: app_id.to_string(),
        title: title.to_string(),
        image_url: Some("https://dl.airtable.com/shots/s.png".to_string()),
        order,
    }
}

/// Fetcher returning canned bytes, or a canned failure.
pub struct FakeFetcher {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub fail_with_status: Option<u16>,
}

impl FakeFetcher {
    pub fn serving(bytes: Vec<u8>, content_type: &str) -> Self {
        Self {
            bytes,
            content_type: Some(content_type.to_string()),
            fail_with_status: None,
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            bytes: Vec::new(),
            content_type: None,
            fail_with_status: Some(status),
        }
    }
}

#[async_trait]
impl UpstreamFetcher for FakeFetcher {
    async fn fetch(&self, path: &str) -> ImagingResult<FetchedImage> {
        if let Some(status) = self.fail_with_status {
            return Err(ImagingError::Upstream {
                status,
                url: format!("https://cdn.test{path}"),
            });
        }
        Ok(FetchedImage {
            bytes: self.bytes.clone(),
            content_type: self.content_type.clone(),
        })
    }
}

/// Assemble a context around the given fakes.
pub fn test_context(store: FakeStore, fetcher: FakeFetcher) -> AxumContext {
    AxumContext {
        catalog: CatalogService::new(Arc::new(store)),
        obfuscator: IdObfuscator::new(),
        queue: AdmissionQueue::with_defaults(),
        fetcher: Arc::new(fetcher),
        normalize: NormalizeConfig::default(),
    }
}
