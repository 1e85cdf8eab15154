use crate::schema::{Schema, SchemaSpec};
use crate::{Error, Result};
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::Path;
use theme_types::{Record, RecordId};

/// The source table, loaded once and read-only afterwards.
///
/// Records keep their original row order; labels chosen by the operator are
/// recorded by the `OutputWriter`, never written back here.
#[derive(Debug, Clone)]
pub struct RecordStore {
    headers: Vec<String>,
    records: Vec<Record>,
    index: HashMap<RecordId, usize>,
}

impl RecordStore {
    pub fn load(path: &Path, spec: &SchemaSpec, select_label: Option<&str>) -> Result<Self> {
        let reader = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;
        let store = Self::from_csv(reader, spec, select_label)?;
        tracing::debug!(
            path = %path.display(),
            records = store.len(),
            "loaded source table"
        );
        Ok(store)
    }

    /// Load from any reader holding CSV text (header row first).
    pub fn from_reader<R: io::Read>(
        reader: R,
        spec: &SchemaSpec,
        select_label: Option<&str>,
    ) -> Result<Self> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);
        Self::from_csv(reader, spec, select_label)
    }

    fn from_csv<R: io::Read>(
        mut reader: csv::Reader<R>,
        spec: &SchemaSpec,
        select_label: Option<&str>,
    ) -> Result<Self> {
        let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
        let schema = Schema::resolve(&headers, spec)?;

        if select_label.is_some() && !schema.has_label() {
            return Err(Error::Schema {
                missing: vec![spec.label_col.clone()],
                available: headers,
            });
        }

        let mut records = Vec::new();
        let mut seen = HashSet::new();
        for (i, row) in reader.records().enumerate() {
            let mut record = schema.record(i + 1, &row?)?;
            if !seen.insert(record.id.clone()) {
                return Err(Error::DuplicateId(record.id));
            }

            match select_label {
                Some(wanted) if record.label.as_deref() != Some(wanted) => continue,
                Some(_) => {}
                // Without relabeling, source labels are not offered as decisions.
                None => record.label = None,
            }
            records.push(record);
        }

        let index = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();

        Ok(Self {
            headers,
            records,
            index,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, id: &RecordId) -> Result<&Record> {
        self.index
            .get(id)
            .map(|&i| &self.records[i])
            .ok_or_else(|| Error::NotFound(id.clone()))
    }

    /// First record in row order whose id is not excluded.
    pub fn next_pending<'a>(&'a self, excluding: &'a HashSet<RecordId>) -> Option<&'a Record> {
        self.pending(excluding).next()
    }

    pub fn pending<'a>(
        &'a self,
        excluding: &'a HashSet<RecordId>,
    ) -> impl Iterator<Item = &'a Record> + 'a {
        self.records
            .iter()
            .filter(move |record| !excluding.contains(&record.id))
    }
}
