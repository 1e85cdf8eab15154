//! Custom assertions for theme-specific validation.
//!
//! - Labels present in the output table
//! - Skip set stored in `cache.json`
//! - Flags in `meta.json`

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

/// `(id, label)` for every row of an output table.
pub fn read_labels(path: &Path, id_col: &str, label_col: &str) -> Result<Vec<(String, String)>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open output table {}", path.display()))?;
    let headers = reader.headers()?.clone();

    let position = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("Column '{}' missing from {}", name, path.display()))
    };
    let id_idx = position(id_col)?;
    let label_idx = position(label_col)?;

    let mut labels = Vec::new();
    for row in reader.records() {
        let row = row?;
        labels.push((
            row.get(id_idx).unwrap_or_default().to_string(),
            row.get(label_idx).unwrap_or_default().to_string(),
        ));
    }
    Ok(labels)
}

/// Assert the output table holds exactly these `(id, label)` rows, in order.
pub fn assert_labels(path: &Path, expected: &[(&str, &str)]) -> Result<()> {
    let actual = read_labels(path, "id", "label")?;
    let expected: Vec<(String, String)> = expected
        .iter()
        .map(|(id, label)| (id.to_string(), label.to_string()))
        .collect();

    if actual != expected {
        anyhow::bail!("Expected labels {:?}, got {:?}", expected, actual);
    }
    Ok(())
}

/// Assert the skip set of `session` in `<folder>/cache.json`.
pub fn assert_skipped(cache_folder: &Path, session: &str, expected: &[&str]) -> Result<()> {
    let path = cache_folder.join("cache.json");
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let json: Value = serde_json::from_str(&content)?;

    let skipped: Vec<&str> = json["sessions"][session]["skipped"]
        .as_array()
        .with_context(|| format!("Expected 'sessions.{}.skipped' array", session))?
        .iter()
        .filter_map(Value::as_str)
        .collect();

    if skipped != expected {
        anyhow::bail!("Expected skipped {:?}, got {:?}", expected, skipped);
    }
    Ok(())
}

/// Load `meta.json` as JSON.
pub fn read_meta(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(serde_json::from_str(&content)?)
}
