use crate::types::LogLevel;

/// Environment variable holding an `EnvFilter` directive; wins over `--log-level`.
pub const LOG_ENV: &str = "THEME_LOG";

/// Install the stderr subscriber. Stdout belongs to the labeling console.
pub fn init(level: LogLevel) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
