//! Screen records - individual UI screenshots belonging to an app.

use serde::{Deserialize, Serialize};

/// A single captured screen of an application.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScreenRecord {
    /// Content-store record id.
    pub id: String,
    /// Record id of the owning application.
    pub app_id: String,
    /// Screen title (e.g. "Onboarding", "Login").
    #[serde(default)]
    pub title: String,
    /// Screenshot URL as stored upstream.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Position within the app's screen gallery.
    #[serde(default)]
    pub order: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_optional_fields_deserialize() {
        let record: ScreenRecord =
            serde_json::from_str(r#"{"id":"scr1","app_id":"rec001"}"#).unwrap();
        assert_eq!(record.id, "scr1");
        assert_eq!(record.title, "");
        assert!(record.image_url.is_none());
        assert_eq!(record.order, 0);
    }
}
