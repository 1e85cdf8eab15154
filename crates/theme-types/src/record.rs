use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a record, taken verbatim from the id column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One labelable row of the source table.
///
/// `fields` keeps the whole source row in column order so the output can
/// reproduce every original column; `text`, `show` and `label` are the
/// schema roles resolved from it at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: RecordId,
    pub text: Option<String>,
    pub show: Vec<(String, Option<String>)>,
    pub label: Option<String>,
    pub fields: Vec<(String, String)>,
}

impl Record {
    /// Look up an original column value by name.
    pub fn field(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Text length in characters (not bytes); zero when the text is missing.
    pub fn text_chars(&self) -> usize {
        self.text.as_deref().map_or(0, |t| t.chars().count())
    }
}
