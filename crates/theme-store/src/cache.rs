use crate::atomic::write_atomic;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use theme_types::{RecordId, SessionMetadata};

pub const CACHE_FILE: &str = "cache.json";

/// Cached state of one named session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CachedSession {
    #[serde(default)]
    pub skipped: Vec<RecordId>,
    /// Ids confirmed while relabeling one `select_label`, whatever label they got.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reviewed: Vec<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SessionMetadata>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CacheFile {
    #[serde(default)]
    sessions: BTreeMap<String, CachedSession>,
}

/// One line of `theme sessions` output.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub name: String,
    pub skipped: usize,
    pub saved_at: Option<DateTime<Utc>>,
}

/// Skip set and run metadata that survive process restarts.
///
/// Several named sessions share one `cache.json`; a cache instance works on
/// one of them. Every mutation is written through immediately unless
/// persistence is disabled.
#[derive(Debug)]
pub struct SessionCache {
    path: PathBuf,
    session: String,
    persist: bool,
    current: CachedSession,
    /// Every other session in the file, written back untouched.
    others: CacheFile,
}

impl SessionCache {
    /// Load `<folder>/cache.json`, or start empty if it does not exist.
    pub fn load_or_create(folder: &Path, session: &str, persist: bool) -> Result<Self> {
        let path = folder.join(CACHE_FILE);
        let mut others = if persist {
            read_cache(&path)?
        } else {
            CacheFile::default()
        };
        let current = others.sessions.remove(session).unwrap_or_default();

        Ok(Self {
            path,
            session: session.to_string(),
            persist,
            current,
            others,
        })
    }

    /// Summaries of every session stored under `folder`.
    pub fn list(folder: &Path) -> Result<Vec<SessionSummary>> {
        let file = read_cache(&folder.join(CACHE_FILE))?;
        Ok(file
            .sessions
            .iter()
            .map(|(name, cached)| SessionSummary {
                name: name.clone(),
                skipped: cached.skipped.len(),
                saved_at: cached.metadata.as_ref().map(|m| m.saved_at),
            })
            .collect())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn session(&self) -> &str {
        &self.session
    }

    pub fn skipped(&self) -> &[RecordId] {
        &self.current.skipped
    }

    pub fn is_skipped(&self, id: &RecordId) -> bool {
        self.current.skipped.contains(id)
    }

    pub fn record_skip(&mut self, id: &RecordId) -> Result<()> {
        let skipped = &mut self.current.skipped;
        if !skipped.contains(id) {
            skipped.push(id.clone());
        }
        self.persist()
    }

    pub fn clear_skip(&mut self, id: &RecordId) -> Result<()> {
        self.current.skipped.retain(|s| s != id);
        self.persist()
    }

    pub fn reviewed(&self) -> &[RecordId] {
        &self.current.reviewed
    }

    pub fn is_reviewed(&self, id: &RecordId) -> bool {
        self.current.reviewed.contains(id)
    }

    pub fn record_review(&mut self, id: &RecordId) -> Result<()> {
        let reviewed = &mut self.current.reviewed;
        if !reviewed.contains(id) {
            reviewed.push(id.clone());
        }
        self.persist()
    }

    pub fn clear_review(&mut self, id: &RecordId) -> Result<()> {
        self.current.reviewed.retain(|r| r != id);
        self.persist()
    }

    /// Metadata stored by the last close of this session.
    pub fn snapshot_metadata(&self) -> Option<&SessionMetadata> {
        self.current.metadata.as_ref()
    }

    pub fn store_metadata(&mut self, metadata: SessionMetadata) -> Result<()> {
        self.current.metadata = Some(metadata);
        self.persist()
    }

    pub fn persist(&self) -> Result<()> {
        if !self.persist {
            return Ok(());
        }
        let mut file = self.others.clone();
        file.sessions
            .insert(self.session.clone(), self.current.clone());
        let bytes = serde_json::to_vec_pretty(&file)?;
        write_atomic(&self.path, &bytes)?;
        Ok(())
    }
}

fn read_cache(path: &Path) -> Result<CacheFile> {
    if !path.exists() {
        return Ok(CacheFile::default());
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
