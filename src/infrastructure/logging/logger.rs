//! Tracing subscriber initialization.

use anyhow::{anyhow, Result};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::domain::models::LoggingConfig;

/// Initialize the global tracing subscriber from configuration.
///
/// The configured level is the default directive; `RUST_LOG` still takes
/// precedence per target. Calling this twice returns an error from the
/// global-default registration, so embedders should do it exactly once.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let default_level = parse_log_level(&config.level)?;

    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);

    match config.format.as_str() {
        "json" => builder
            .json()
            .with_current_span(true)
            .with_target(true)
            .try_init()
            .map_err(|e| anyhow!("failed to initialize json logger: {e}"))?,
        "pretty" => builder
            .with_target(true)
            .try_init()
            .map_err(|e| anyhow!("failed to initialize logger: {e}"))?,
        other => return Err(anyhow!("unknown log format: {other}")),
    }

    Ok(())
}

fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        other => Err(anyhow!("unknown log level: {other}")),
    }
}
