//! Configuration: `.amrscope.toml` discovery, environment overrides and
//! process-wide cached accessors.
//!
//! The dataset engine never reads this module; thresholds and palettes
//! reach it through [`ViewDefaults`](crate::views::ViewDefaults).

mod accessors;
mod core;
mod display;
mod loader;
mod thresholds;

pub use accessors::{
    get_config, get_display_config, get_export_config, get_remote_config, get_risk_thresholds,
    get_view_defaults, init_config,
};
pub use core::{AmrscopeConfig, ExportConfig, RemoteConfig};
pub use display::DisplayConfig;
pub use loader::{
    default_config_template, directory_ancestors, load_config, load_config_file,
    load_config_from_dir, parse_and_validate_config, write_default_config, CONFIG_FILE_NAME,
};
pub use thresholds::{validate_rate_ceiling, ThresholdsConfig};
