//! App handlers - catalog listing and detail reads.

use axum::Json;
use axum::extract::{Path, Query, State};

use crate::dto::{self, AppDto, ScreenDto};
use crate::error::HttpError;
use crate::state::AppState;
use publico_core::{AppFilter, AppKind, Platform};

/// Query parameters for listing apps.
#[derive(Debug, Default, serde::Deserialize)]
pub struct AppListQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub platform: Option<String>,
    pub search: Option<String>,
}

impl AppListQuery {
    fn into_filter(self) -> Result<AppFilter, HttpError> {
        let kind = self
            .kind
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<AppKind>())
            .transpose()
            .map_err(HttpError::BadRequest)?;
        let platform = self
            .platform
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<Platform>())
            .transpose()
            .map_err(HttpError::BadRequest)?;

        Ok(AppFilter {
            kind,
            platform,
            search: self.search.filter(|s| !s.trim().is_empty()),
        })
    }
}

/// List apps matching the filter, name ascending.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<AppListQuery>,
) -> Result<Json<Vec<AppDto>>, HttpError> {
    let filter = query.into_filter()?;
    let apps = state.catalog.list_apps(&filter).await;
    Ok(Json(
        apps.iter()
            .map(|app| dto::app_to_dto(app, &state.obfuscator, &state.normalize))
            .collect(),
    ))
}

/// Get a single app by its public id.
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AppDto>, HttpError> {
    let record_id = state.obfuscator.resolve_or_raw(&id);
    let app = state.catalog.get_app(&record_id).await?;
    Ok(Json(dto::app_to_dto(&app, &state.obfuscator, &state.normalize)))
}

/// List an app's screens, order ascending.
pub async fn screens(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ScreenDto>>, HttpError> {
    let record_id = state.obfuscator.resolve_or_raw(&id);
    let screens = state.catalog.app_screens(&record_id).await;
    Ok(Json(
        screens
            .iter()
            .map(|screen| dto::screen_to_dto(screen, &state.obfuscator, &state.normalize))
            .collect(),
    ))
}
