use crate::args::RunArgs;
use crate::console::TerminalConsole;
use anyhow::{Context, Result};
use theme_runtime::{Config, Runner};

pub fn handle(args: &RunArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("config file not found: {}", path.display());
            }
            Config::load_from(path)
                .with_context(|| format!("failed to read {}", path.display()))?
        }
        None => Config::default(),
    };
    args.apply(&mut config)?;

    let settings = config.validate()?;
    let mut runner = Runner::open(settings)?;
    let mut console = TerminalConsole::stdio()?;

    let outcome = runner.run(&mut console)?;
    tracing::debug!(termination = ?outcome.termination, "run finished");
    Ok(())
}
