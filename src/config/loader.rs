use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::AmrscopeConfig;
use super::display::DisplayConfig;
use super::thresholds::ThresholdsConfig;
use crate::errors::{Error, Result};
use crate::projection::metric::MAX_RATE_DECIMALS;

pub const CONFIG_FILE_NAME: &str = ".amrscope.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Read a config file into a string.
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse TOML and replace invalid sections with their defaults.
pub fn parse_and_validate_config(contents: &str) -> Result<AmrscopeConfig> {
    let mut config = toml::from_str::<AmrscopeConfig>(contents)?;

    if let Some(ref thresholds) = config.thresholds {
        if let Err(e) = thresholds.validate() {
            log::warn!("Invalid thresholds: {}. Using defaults.", e);
            config.thresholds = Some(ThresholdsConfig::default());
        }
    }

    if let Some(ref display) = config.display {
        if display.rate_decimals > MAX_RATE_DECIMALS {
            log::warn!(
                "rate_decimals {} is out of range (0-{}). Using default.",
                display.rate_decimals,
                MAX_RATE_DECIMALS
            );
            config.display = Some(DisplayConfig {
                rate_decimals: DisplayConfig::default().rate_decimals,
                ..display.clone()
            });
        }
    }

    Ok(config)
}

/// Load a config from `config_path`, or `None` when it is missing or bad.
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<AmrscopeConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!(
                "Failed to parse {}: {}. Using defaults.",
                config_path.display(),
                e
            );
            None
        }
    }
}

/// Only log actual errors, not "file not found".
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// `start` followed by its ancestors, at most `max_depth` entries.
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `.amrscope.toml`.
pub fn load_config_from_dir(start: PathBuf) -> AmrscopeConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            AmrscopeConfig::default()
        })
}

/// Discover the config from the current directory and apply environment
/// overrides.
pub fn load_config() -> AmrscopeConfig {
    let mut config = match std::env::current_dir() {
        Ok(dir) => load_config_from_dir(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            AmrscopeConfig::default()
        }
    };
    config.apply_env_overrides(|key| std::env::var(key).ok());
    config
}

/// Load an explicitly named config file. Unlike discovery, a missing or
/// malformed file is an error.
pub fn load_config_file(path: &Path) -> Result<AmrscopeConfig> {
    let contents = read_config_file(path).map_err(|e| {
        Error::configuration_with_path(format!("cannot read config file: {e}"), path)
    })?;
    let mut config = parse_and_validate_config(&contents).map_err(|e| {
        Error::configuration_with_path(format!("invalid config file: {e}"), path)
    })?;
    config.apply_env_overrides(|key| std::env::var(key).ok());
    Ok(config)
}

const DEFAULT_CONFIG_TEMPLATE: &str = r##"# amrscope configuration

[thresholds]
# Rates below low_max are Low, rates at or above moderate_max are High.
low_max = 20.0
moderate_max = 40.0
# Adjusted rates are clamped to [0, rate_ceiling].
rate_ceiling = 95.0

[display]
rate_decimals = 1
low_color = "#22c55e"
moderate_color = "#f59e0b"
high_color = "#ef4444"
palette = ["#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#ec4899", "#14b8a6", "#f97316"]

[remote]
# endpoint = "https://example.org/functions/v1/filter-options"
column_param = "column"
timeout_secs = 10

[export]
# directory = "exports"
include_header = true
"##;

pub fn default_config_template() -> &'static str {
    DEFAULT_CONFIG_TEMPLATE
}

/// Write the default config into `dir`. Refuses to overwrite unless
/// `force` is set.
pub fn write_default_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() && !force {
        return Err(Error::configuration_with_path(
            "config file already exists (use --force to overwrite)",
            &path,
        ));
    }
    fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
    Ok(path)
}
