use crate::{Error, Result};
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use theme_types::{Record, RecordId};

/// Column roles requested by the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSpec {
    pub id_col: String,
    pub text_col: String,
    pub label_col: String,
    #[serde(default)]
    pub show_cols: Vec<String>,
}

/// A `SchemaSpec` resolved against a concrete header.
///
/// Column lookups by name happen once here; afterwards rows are read by
/// index, so a missing column fails at load time and nowhere else.
#[derive(Debug, Clone)]
pub struct Schema {
    headers: Vec<String>,
    id: usize,
    text: usize,
    label: Option<usize>,
    show: Vec<(String, usize)>,
    id_col: String,
}

impl Schema {
    pub fn resolve(headers: &[String], spec: &SchemaSpec) -> Result<Self> {
        let position = |name: &str| headers.iter().position(|h| h == name);

        let mut missing = Vec::new();
        for col in spec
            .show_cols
            .iter()
            .chain([&spec.text_col, &spec.id_col])
        {
            if position(col).is_none() && !missing.contains(col) {
                missing.push(col.clone());
            }
        }

        if !missing.is_empty() {
            return Err(Error::Schema {
                missing,
                available: headers.to_vec(),
            });
        }

        let show = spec
            .show_cols
            .iter()
            .filter_map(|col| position(col).map(|idx| (col.clone(), idx)))
            .collect();

        Ok(Self {
            headers: headers.to_vec(),
            id: position(&spec.id_col).unwrap_or_default(),
            text: position(&spec.text_col).unwrap_or_default(),
            label: position(&spec.label_col),
            show,
            id_col: spec.id_col.clone(),
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn has_label(&self) -> bool {
        self.label.is_some()
    }

    /// Build a record from a data row; `row` is the 1-based data row number.
    pub fn record(&self, row: usize, fields: &StringRecord) -> Result<Record> {
        let cell = |idx: usize| fields.get(idx).unwrap_or("");
        let non_empty = |idx: usize| {
            let value = cell(idx);
            (!value.is_empty()).then(|| value.to_string())
        };

        let id = cell(self.id);
        if id.trim().is_empty() {
            return Err(Error::IdType {
                row,
                column: self.id_col.clone(),
            });
        }

        Ok(Record {
            id: RecordId::new(id),
            text: non_empty(self.text),
            show: self
                .show
                .iter()
                .map(|(name, idx)| (name.clone(), non_empty(*idx)))
                .collect(),
            label: self.label.and_then(non_empty),
            fields: self
                .headers
                .iter()
                .enumerate()
                .map(|(idx, name)| (name.clone(), cell(idx).to_string()))
                .collect(),
        })
    }
}
