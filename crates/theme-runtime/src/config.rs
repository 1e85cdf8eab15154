use crate::{Error, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use theme_engine::{BreakSchedule, DEFAULT_PAGE_CHARS};
use theme_store::{RelabelPolicy, SchemaSpec};
use theme_types::{CommandTokens, LabelMap};

pub const DEFAULT_CONFIG_FILE: &str = "theme.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_cache_folder")]
    pub folder: PathBuf,
    #[serde(default = "default_session")]
    pub session: String,
    #[serde(default)]
    pub revisit_skipped: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            folder: default_cache_folder(),
            session: default_session(),
            revisit_skipped: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Extra key/values copied into every metadata record.
    #[serde(default)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            extra: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreaksConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_minutes: Option<u32>,
}

fn default_true() -> bool {
    true
}

fn default_cache_folder() -> PathBuf {
    PathBuf::from(".theme")
}

fn default_session() -> String {
    "default".to_string()
}

/// Contents of `theme.toml`. Every field is optional here; `validate`
/// decides what is actually required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unmarked: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marked: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_col: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_col: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_col: Option<String>,
    #[serde(default)]
    pub show_cols: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_chars: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select_label: Option<String>,
    #[serde(default)]
    pub relabel_policy: RelabelPolicy,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub commands: CommandTokens,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub meta: MetaConfig,
    #[serde(default)]
    pub breaks: BreaksConfig,
}

/// Fully validated settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub unmarked: PathBuf,
    pub marked: PathBuf,
    pub schema: SchemaSpec,
    pub labels: LabelMap,
    pub tokens: CommandTokens,
    pub page_chars: usize,
    pub select_label: Option<String>,
    pub relabel_policy: RelabelPolicy,
    pub cache: CacheConfig,
    pub meta: MetaConfig,
    pub breaks: BreaksConfig,
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Starting point written by `theme init`.
    pub fn template() -> Self {
        Self {
            unmarked: Some(PathBuf::from("data.csv")),
            marked: Some(PathBuf::from("markup.csv")),
            id_col: Some("id".to_string()),
            text_col: Some("text".to_string()),
            label_col: Some("label".to_string()),
            show_cols: vec!["title".to_string()],
            show_chars: Some(DEFAULT_PAGE_CHARS),
            labels: BTreeMap::from([
                ("0".to_string(), "fake".to_string()),
                ("1".to_string(), "real".to_string()),
            ]),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<Settings> {
        let unmarked = required(&self.unmarked, "unmarked")?;
        let marked = required(&self.marked, "marked")?;
        let schema = SchemaSpec {
            id_col: required(&self.id_col, "id_col")?,
            text_col: required(&self.text_col, "text_col")?,
            label_col: required(&self.label_col, "label_col")?,
            show_cols: self.show_cols.clone(),
        };

        if self.labels.is_empty() {
            return Err(Error::Config(
                "at least one label is required ([labels] table or --label TOKEN=VALUE)"
                    .to_string(),
            ));
        }
        let labels = LabelMap::new(self.labels.clone())?;
        self.commands.check_against(&labels)?;

        let page_chars = self.show_chars.unwrap_or(DEFAULT_PAGE_CHARS);
        if page_chars == 0 {
            return Err(Error::Config("show_chars should be >= 1".to_string()));
        }

        BreakSchedule::from_options(
            self.breaks.label_minutes,
            self.breaks.break_minutes,
            Utc::now(),
        )
        .map_err(|e| Error::Config(e.to_string()))?;

        if self.cache.session.trim().is_empty() {
            return Err(Error::Config("cache session name is empty".to_string()));
        }

        Ok(Settings {
            unmarked,
            marked,
            schema,
            labels,
            tokens: self.commands.clone(),
            page_chars,
            select_label: self.select_label.clone(),
            relabel_policy: self.relabel_policy,
            cache: self.cache.clone(),
            meta: self.meta.clone(),
            breaks: self.breaks.clone(),
        })
    }
}

fn required<T: Clone>(value: &Option<T>, name: &str) -> Result<T> {
    value
        .clone()
        .ok_or_else(|| Error::Config(format!("missing required option '{}'", name)))
}
