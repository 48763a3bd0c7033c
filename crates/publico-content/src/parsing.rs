//! Boundary validation of loosely typed upstream records.
//!
//! The store's `fields` object is free-form: editors add columns, rename
//! things, leave cells blank. Everything is validated into core records
//! here; records missing required fields are logged and skipped, never
//! passed through.

use publico_core::{AppKind, AppRecord, DocumentRecord, DocumentStatus, Platform, ScreenRecord};
use serde::Deserialize;
use serde_json::Value;

/// Envelope for list responses.
#[derive(Debug, Deserialize)]
pub struct RawRecordList {
    #[serde(default)]
    pub records: Vec<RawRecord>,
}

/// A single raw record: opaque id plus a free-form field map.
#[derive(Debug, Deserialize)]
pub struct RawRecord {
    pub id: String,
    #[serde(default)]
    pub fields: Value,
}

fn field_str(fields: &Value, key: &str) -> Option<String> {
    fields.get(key)?.as_str().map(str::to_string)
}

fn field_i64(fields: &Value, key: &str) -> i64 {
    fields.get(key).and_then(Value::as_i64).unwrap_or(0)
}

fn field_bool(fields: &Value, key: &str) -> bool {
    fields.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// First attachment URL from an Airtable-style attachment array, or a plain
/// string URL field.
fn field_image_url(fields: &Value, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => items
            .first()
            .and_then(|item| item.get("url"))
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

/// Validate an app record. Returns `None` (after logging) when required
/// fields are missing or unrecognized.
pub fn parse_app(record: &RawRecord) -> Option<AppRecord> {
    let Some(name) = field_str(&record.fields, "name") else {
        tracing::warn!(record_id = %record.id, "Skipping app record without a name");
        return None;
    };

    let kind = match field_str(&record.fields, "type")
        .unwrap_or_default()
        .parse::<AppKind>()
    {
        Ok(kind) => kind,
        Err(e) => {
            tracing::warn!(record_id = %record.id, "Skipping app record: {e}");
            return None;
        }
    };

    let platforms = record
        .fields
        .get("platforms")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .filter_map(|s| s.parse::<Platform>().ok())
                .collect()
        })
        .unwrap_or_default();

    Some(AppRecord {
        id: record.id.clone(),
        name,
        description: field_str(&record.fields, "description").unwrap_or_default(),
        kind,
        platforms,
        cover_url: field_image_url(&record.fields, "cover"),
        order: field_i64(&record.fields, "order"),
        published: field_bool(&record.fields, "published"),
    })
}

/// Validate a screen record.
pub fn parse_screen(record: &RawRecord) -> Option<ScreenRecord> {
    // The app link arrives either as a plain id or a linked-record array
    let app_id = field_str(&record.fields, "app").or_else(|| {
        record
            .fields
            .get("app")
            .and_then(Value::as_array)
            .and_then(|items| items.first())
            .and_then(Value::as_str)
            .map(str::to_string)
    });

    let Some(app_id) = app_id else {
        tracing::warn!(record_id = %record.id, "Skipping screen record without an app link");
        return None;
    };

    Some(ScreenRecord {
        id: record.id.clone(),
        app_id,
        title: field_str(&record.fields, "title").unwrap_or_default(),
        image_url: field_image_url(&record.fields, "image"),
        order: field_i64(&record.fields, "order"),
    })
}

/// Validate a document record.
pub fn parse_document(record: &RawRecord) -> Option<DocumentRecord> {
    let Some(title) = field_str(&record.fields, "title") else {
        tracing::warn!(record_id = %record.id, "Skipping document record without a title");
        return None;
    };

    let status = match field_str(&record.fields, "status").as_deref() {
        Some("published") => DocumentStatus::Published,
        _ => DocumentStatus::Draft,
    };

    Some(DocumentRecord {
        id: record.id.clone(),
        title,
        content: field_str(&record.fields, "content").unwrap_or_default(),
        status,
    })
}
