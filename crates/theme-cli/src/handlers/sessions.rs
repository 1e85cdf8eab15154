use anyhow::{Context, Result};
use std::path::Path;
use theme_runtime::Config;
use theme_store::SessionCache;

pub fn handle(config: Option<&Path>, cache_folder: Option<&Path>) -> Result<()> {
    let folder = match (cache_folder, config) {
        (Some(folder), _) => folder.to_path_buf(),
        (None, Some(path)) => {
            Config::load_from(path)
                .with_context(|| format!("failed to read {}", path.display()))?
                .cache
                .folder
        }
        (None, None) => Config::default().cache.folder,
    };

    let sessions = SessionCache::list(&folder)?;
    if sessions.is_empty() {
        println!("No cached sessions in {}", folder.display());
        return Ok(());
    }

    println!("{:<20} {:>8}  SAVED", "SESSION", "SKIPPED");
    for session in sessions {
        let saved = session
            .saved_at
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:<20} {:>8}  {}", session.name, session.skipped, saved);
    }
    Ok(())
}
