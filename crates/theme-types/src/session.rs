use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Progress tallies shown in the menu and written with the metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCounts {
    #[serde(default)]
    pub marked: usize,
    #[serde(default)]
    pub unmarked: usize,
    #[serde(default)]
    pub skipped: usize,
}

/// Durable summary of one labeling session, written when it closes.
///
/// Every field defaults on load so files written by older versions (or
/// edited by hand) still parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMetadata {
    #[serde(default = "default_session")]
    pub session: String,
    #[serde(default = "Utc::now")]
    pub started_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub saved_at: DateTime<Utc>,
    /// Rows in the output table.
    #[serde(default)]
    pub size: usize,
    /// Output rows per label value.
    #[serde(default)]
    pub labels: BTreeMap<String, usize>,
    #[serde(default)]
    pub counts: SessionCounts,
    #[serde(default)]
    pub interrupted: bool,
    #[serde(default, flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

fn default_session() -> String {
    "default".to_string()
}

impl SessionMetadata {
    pub fn new(session: impl Into<String>, started_at: DateTime<Utc>) -> Self {
        Self {
            session: session.into(),
            started_at,
            saved_at: started_at,
            size: 0,
            labels: BTreeMap::new(),
            counts: SessionCounts::default(),
            interrupted: false,
            extra: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_tolerates_missing_fields() {
        let meta: SessionMetadata = serde_json::from_str(r#"{"size": 3}"#).unwrap();
        assert_eq!(meta.size, 3);
        assert_eq!(meta.session, "default");
        assert_eq!(meta.counts, SessionCounts::default());
        assert!(!meta.interrupted);
    }

    #[test]
    fn test_extra_fields_are_flattened() {
        let mut meta = SessionMetadata::new("nightly", Utc::now());
        meta.extra
            .insert("annotator".to_string(), serde_json::json!("alice"));

        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(value["annotator"], "alice");
        assert_eq!(value["session"], "nightly");

        let back: SessionMetadata = serde_json::from_value(value).unwrap();
        assert_eq!(back.extra.get("annotator"), Some(&serde_json::json!("alice")));
    }
}
