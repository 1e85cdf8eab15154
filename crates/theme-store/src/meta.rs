use crate::Result;
use crate::atomic::write_atomic;
use std::path::{Path, PathBuf};
use theme_types::SessionMetadata;

pub const META_FILE: &str = "meta.json";

/// `meta.json` lives next to the output table.
pub fn metadata_path(marked: &Path) -> PathBuf {
    marked
        .parent()
        .map(|dir| dir.join(META_FILE))
        .unwrap_or_else(|| PathBuf::from(META_FILE))
}

pub fn write_metadata(path: &Path, metadata: &SessionMetadata) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(metadata)?;
    write_atomic(path, &bytes)?;
    Ok(())
}

pub fn read_metadata(path: &Path) -> Result<Option<SessionMetadata>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&content)?))
}
