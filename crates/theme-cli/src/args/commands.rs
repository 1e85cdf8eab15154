use clap::{Args, Subcommand};
use std::path::PathBuf;
use theme_runtime::Config;
use theme_types::LabelMap;
use theme_runtime::config::DEFAULT_CONFIG_FILE;

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Start or resume a labeling session")]
    Run(RunArgs),

    #[command(about = "List cached sessions")]
    Sessions {
        #[arg(long, help = "Config file to read the cache folder from")]
        config: Option<PathBuf>,

        #[arg(long, help = "Cache folder (overrides the config file)")]
        cache_folder: Option<PathBuf>,
    },

    #[command(about = "Write a starter config file")]
    Init {
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        path: PathBuf,

        #[arg(long, help = "Overwrite an existing file")]
        force: bool,
    },
}

/// Flags for `theme run`. Anything given here overrides the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    #[arg(long, help = "TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Source CSV with records to label")]
    pub unmarked: Option<PathBuf>,

    #[arg(long, help = "Output CSV with labeled records")]
    pub marked: Option<PathBuf>,

    #[arg(long)]
    pub id_col: Option<String>,

    #[arg(long)]
    pub text_col: Option<String>,

    #[arg(long)]
    pub label_col: Option<String>,

    #[arg(long = "show-col", help = "Extra column to display (repeatable)")]
    pub show_cols: Vec<String>,

    #[arg(
        long = "label",
        value_name = "TOKEN=VALUE",
        value_parser = parse_label,
        help = "Map an input token to a label (repeatable)"
    )]
    pub labels: Vec<(String, String)>,

    #[arg(long, help = "Only review records whose source label equals this value")]
    pub select_label: Option<String>,

    #[arg(long, help = "Characters of text shown per page")]
    pub show_chars: Option<usize>,

    #[arg(long, allow_hyphen_values = true)]
    pub skip_token: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub back_token: Option<String>,

    #[arg(long, help = "Session name in the cache")]
    pub session: Option<String>,

    #[arg(long, help = "Keep the skip set in memory only")]
    pub no_cache: bool,

    #[arg(long, help = "Offer records skipped in earlier runs again")]
    pub revisit_skipped: bool,

    #[arg(long, help = "Do not write meta.json")]
    pub no_meta: bool,
}

impl RunArgs {
    /// Layer the flags on top of a loaded config.
    ///
    /// Fails if `--label` maps the same token twice.
    pub fn apply(&self, config: &mut Config) -> theme_types::Result<()> {
        if let Some(path) = &self.unmarked {
            config.unmarked = Some(path.clone());
        }
        if let Some(path) = &self.marked {
            config.marked = Some(path.clone());
        }
        if let Some(col) = &self.id_col {
            config.id_col = Some(col.clone());
        }
        if let Some(col) = &self.text_col {
            config.text_col = Some(col.clone());
        }
        if let Some(col) = &self.label_col {
            config.label_col = Some(col.clone());
        }
        if !self.show_cols.is_empty() {
            config.show_cols = self.show_cols.clone();
        }
        if !self.labels.is_empty() {
            let labels = LabelMap::new(self.labels.iter().cloned())?;
            config.labels = labels
                .iter()
                .map(|(token, label)| (token.to_string(), label.to_string()))
                .collect();
        }
        if let Some(label) = &self.select_label {
            config.select_label = Some(label.clone());
        }
        if let Some(chars) = self.show_chars {
            config.show_chars = Some(chars);
        }
        if let Some(token) = &self.skip_token {
            config.commands.skip = token.clone();
        }
        if let Some(token) = &self.back_token {
            config.commands.back = token.clone();
        }
        if let Some(session) = &self.session {
            config.cache.session = session.clone();
        }
        if self.no_cache {
            config.cache.enabled = false;
        }
        if self.revisit_skipped {
            config.cache.revisit_skipped = true;
        }
        if self.no_meta {
            config.meta.enabled = false;
        }
        Ok(())
    }
}

fn parse_label(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((token, label)) if !label.is_empty() => Ok((token.to_string(), label.to_string())),
        _ => Err(format!("expected TOKEN=VALUE, got '{}'", s)),
    }
}
