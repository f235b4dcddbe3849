use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Initialize structured logging to stderr.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` (from config) is used.
/// Stdout is left for command output.
pub fn init_logging(default_filter: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_filter))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {}", e))?;

    tracing::debug!(filter = default_filter, "logging initialized");
    Ok(())
}
