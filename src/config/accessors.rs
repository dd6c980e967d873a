use std::sync::OnceLock;

use super::core::{AmrscopeConfig, ExportConfig, RemoteConfig};
use super::display::DisplayConfig;
use super::loader::load_config;
use crate::projection::RiskThresholds;
use crate::views::ViewDefaults;

/// Cache the configuration
static CONFIG: OnceLock<AmrscopeConfig> = OnceLock::new();
static RISK_THRESHOLDS: OnceLock<RiskThresholds> = OnceLock::new();

/// Install an explicitly loaded configuration (e.g. from `--config`).
///
/// Returns `false` when a configuration was already cached; the cached one
/// is kept.
pub fn init_config(config: AmrscopeConfig) -> bool {
    CONFIG.set(config).is_ok()
}

/// Get the cached configuration, discovering it on first use
pub fn get_config() -> &'static AmrscopeConfig {
    CONFIG.get_or_init(load_config)
}

/// Get the risk tier boundaries (with defaults if not configured)
pub fn get_risk_thresholds() -> &'static RiskThresholds {
    RISK_THRESHOLDS.get_or_init(|| get_config().thresholds().risk_thresholds())
}

pub fn get_display_config() -> DisplayConfig {
    get_config().display()
}

pub fn get_remote_config() -> RemoteConfig {
    get_config().remote()
}

pub fn get_export_config() -> ExportConfig {
    get_config().export()
}

/// View presentation defaults derived from the cached configuration
pub fn get_view_defaults() -> ViewDefaults {
    get_config().view_defaults()
}
