use crate::atomic::write_atomic;
use crate::schema::SchemaSpec;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use theme_types::{Record, RecordId};

/// What happens to an existing label when a record is labeled again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelabelPolicy {
    /// Replace the old label.
    #[default]
    Overwrite,
    /// Replace the old label and append it to `<label_col>_history`.
    Preserve,
}

#[derive(Debug, Clone)]
enum UndoEntry {
    Inserted(RecordId),
    Updated {
        id: RecordId,
        label: String,
        history: Option<String>,
    },
}

impl UndoEntry {
    fn id(&self) -> &RecordId {
        match self {
            UndoEntry::Inserted(id) | UndoEntry::Updated { id, .. } => id,
        }
    }
}

/// The output ("marked") table.
///
/// Rows are held in memory and the whole table is atomically rewritten on
/// `flush`. Each `append` pushes an undo entry so back-navigation can
/// revert the most recent decisions in reverse order.
#[derive(Debug)]
pub struct OutputWriter {
    path: PathBuf,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    index: HashMap<RecordId, usize>,
    id_idx: usize,
    label_idx: usize,
    history_idx: Option<usize>,
    policy: RelabelPolicy,
    undo: Vec<UndoEntry>,
    dirty: bool,
}

impl OutputWriter {
    /// Open the output table, creating an empty one (in memory) if the file
    /// does not exist yet.
    pub fn open(
        path: &Path,
        source_headers: &[String],
        spec: &SchemaSpec,
        policy: RelabelPolicy,
    ) -> Result<Self> {
        let existed = path.exists();
        let (mut headers, mut rows) = if existed {
            read_table(path)?
        } else {
            (source_headers.to_vec(), Vec::new())
        };

        let Some(id_idx) = headers.iter().position(|h| *h == spec.id_col) else {
            return Err(Error::Schema {
                missing: vec![spec.id_col.clone()],
                available: headers,
            });
        };

        let mut added = false;
        let mut ensure_column = |name: &str, headers: &mut Vec<String>| -> usize {
            if let Some(idx) = headers.iter().position(|h| h == name) {
                return idx;
            }
            headers.push(name.to_string());
            for row in rows.iter_mut() {
                row.push(String::new());
            }
            added = true;
            headers.len() - 1
        };

        for col in source_headers {
            ensure_column(col, &mut headers);
        }
        let label_idx = ensure_column(&spec.label_col, &mut headers);
        let history_idx = match policy {
            RelabelPolicy::Preserve => {
                Some(ensure_column(&history_column(&spec.label_col), &mut headers))
            }
            RelabelPolicy::Overwrite => None,
        };

        // A table that only exists in memory is written on the first flush
        // after an append; an existing file is rewritten if columns were added.
        let dirty = existed && added;

        let mut index = HashMap::new();
        for (i, row) in rows.iter().enumerate() {
            let id = RecordId::new(row[id_idx].clone());
            if index.insert(id.clone(), i).is_some() {
                return Err(Error::DuplicateId(id));
            }
        }

        tracing::debug!(path = %path.display(), rows = rows.len(), "opened output table");

        Ok(Self {
            path: path.to_path_buf(),
            headers,
            rows,
            index,
            id_idx,
            label_idx,
            history_idx,
            policy,
            undo: Vec::new(),
            dirty,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn policy(&self) -> RelabelPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.index.contains_key(id)
    }

    pub fn label_of(&self, id: &RecordId) -> Option<&str> {
        self.index
            .get(id)
            .map(|&i| self.rows[i][self.label_idx].as_str())
    }

    /// Value of any column for a stored row.
    pub fn value(&self, id: &RecordId, column: &str) -> Option<&str> {
        let col = self.headers.iter().position(|h| h == column)?;
        self.index.get(id).map(|&i| self.rows[i][col].as_str())
    }

    pub fn ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.rows
            .iter()
            .map(|row| RecordId::new(row[self.id_idx].clone()))
    }

    /// Rows per non-empty label value.
    pub fn label_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for row in &self.rows {
            let label = &row[self.label_idx];
            if !label.is_empty() {
                *counts.entry(label.clone()).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Record `label` for `record`: a new row, or an in-place update when
    /// the id is already present. Nothing reaches disk until `flush`.
    pub fn append(&mut self, record: &Record, label: &str) {
        if let Some(&i) = self.index.get(&record.id) {
            let row = &mut self.rows[i];
            let previous = std::mem::replace(&mut row[self.label_idx], label.to_string());
            let history = self.history_idx.map(|h| {
                let old = row[h].clone();
                if !previous.is_empty() {
                    row[h] = if old.is_empty() {
                        previous.clone()
                    } else {
                        format!("{};{}", old, previous)
                    };
                }
                old
            });
            self.undo.push(UndoEntry::Updated {
                id: record.id.clone(),
                label: previous,
                history,
            });
        } else {
            let row: Vec<String> = self
                .headers
                .iter()
                .enumerate()
                .map(|(i, column)| {
                    if i == self.label_idx {
                        label.to_string()
                    } else if Some(i) == self.history_idx {
                        String::new()
                    } else {
                        record.field(column).unwrap_or_default().to_string()
                    }
                })
                .collect();
            self.index.insert(record.id.clone(), self.rows.len());
            self.rows.push(row);
            self.undo.push(UndoEntry::Inserted(record.id.clone()));
        }
        self.dirty = true;
    }

    /// Revert the most recent `append`, which must have been for `id`.
    pub fn undo(&mut self, id: &RecordId) -> Result<()> {
        match self.undo.last() {
            Some(entry) if entry.id() == id => {}
            _ => return Err(Error::NotFound(id.clone())),
        }

        match self.undo.pop() {
            Some(UndoEntry::Inserted(id)) => {
                if let Some(i) = self.index.remove(&id) {
                    self.rows.remove(i);
                    for pos in self.index.values_mut() {
                        if *pos > i {
                            *pos -= 1;
                        }
                    }
                }
            }
            Some(UndoEntry::Updated { id, label, history }) => {
                if let Some(&i) = self.index.get(&id) {
                    self.rows[i][self.label_idx] = label;
                    if let (Some(h), Some(history)) = (self.history_idx, history) {
                        self.rows[i][h] = history;
                    }
                }
            }
            None => return Err(Error::NotFound(id.clone())),
        }
        self.dirty = true;
        Ok(())
    }

    /// Durably write the table if anything changed since the last flush.
    pub fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(&self.headers)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        let bytes = wtr.into_inner()?;

        write_atomic(&self.path, &bytes)?;
        self.dirty = false;
        Ok(())
    }
}

pub(crate) fn history_column(label_col: &str) -> String {
    format!("{}_history", label_col)
}

fn read_table(path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
    let mut rows = Vec::new();
    for row in reader.records() {
        let row = row?;
        let mut values: Vec<String> = row.iter().map(String::from).collect();
        values.resize(headers.len(), String::new());
        rows.push(values);
    }
    Ok((headers, rows))
}
