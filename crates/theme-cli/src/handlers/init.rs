use anyhow::Result;
use std::path::Path;
use theme_runtime::Config;

pub fn handle(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    Config::template().save_to(path)?;
    println!("Wrote {}", path.display());
    println!("Edit the paths, columns and [labels], then start with:");
    println!("  theme run --config {}", path.display());
    Ok(())
}
