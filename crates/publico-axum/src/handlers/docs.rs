//! Document handlers.

use axum::Json;
use axum::extract::{Path, State};

use crate::dto::{self, DocumentDto};
use crate::error::HttpError;
use crate::state::AppState;

/// Fetch a published document by title.
pub async fn get(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Json<DocumentDto>, HttpError> {
    let document = state.catalog.get_document(&title).await?;
    Ok(Json(dto::document_to_dto(&document, &state.obfuscator)))
}
