//! Runtime setup for the CLI: logging and configuration.

use crate::config::{self, AmrscopeConfig};
use anyhow::{Context, Result};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "AMRSCOPE_LOG";

/// Filter directives for a verbosity count when no env filter is set.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Build the log filter: `-v` flags win, then `AMRSCOPE_LOG`, then
/// `RUST_LOG`, then `warn`.
pub fn build_env_filter(verbosity: u8) -> EnvFilter {
    if verbosity > 0 {
        return EnvFilter::new(default_directive(verbosity));
    }
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directive(0)))
}

/// Install the global tracing subscriber, writing to stderr.
pub fn init_logging(verbosity: u8) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(verbosity))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();

    if let Err(e) = result {
        eprintln!("Note: logging already initialized: {}", e);
    }
}

/// Load `--config` if given and install it as the process-wide config.
/// Without a path, the config is discovered lazily on first access.
pub fn load_configuration(path: Option<&Path>) -> Result<&'static AmrscopeConfig> {
    if let Some(path) = path {
        let loaded = config::load_config_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
        if !config::init_config(loaded) {
            tracing::warn!("configuration already initialized, ignoring {}", path.display());
        }
    }
    Ok(config::get_config())
}
