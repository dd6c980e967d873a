use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::display::DisplayConfig;
use super::thresholds::{validate_rate_ceiling, ThresholdsConfig};
use crate::views::ViewDefaults;

/// Root configuration structure for amrscope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AmrscopeConfig {
    /// Risk tier boundaries and the rate clamp
    #[serde(default)]
    pub thresholds: Option<ThresholdsConfig>,

    /// Rounding and colors
    #[serde(default)]
    pub display: Option<DisplayConfig>,

    /// Remote option catalog endpoint
    #[serde(default)]
    pub remote: Option<RemoteConfig>,

    /// Export defaults
    #[serde(default)]
    pub export: Option<ExportConfig>,
}

/// `[remote]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Query parameter naming the column to list (default: "column")
    #[serde(default = "default_column_param")]
    pub column_param: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            column_param: default_column_param(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_column_param() -> String {
    "column".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// `[export]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Where `--save` places artifacts (default: current directory)
    #[serde(default)]
    pub directory: Option<PathBuf>,

    #[serde(default = "default_include_header")]
    pub include_header: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: None,
            include_header: default_include_header(),
        }
    }
}

fn default_include_header() -> bool {
    true
}

impl AmrscopeConfig {
    pub fn thresholds(&self) -> ThresholdsConfig {
        self.thresholds.clone().unwrap_or_default()
    }

    pub fn display(&self) -> DisplayConfig {
        self.display.clone().unwrap_or_default()
    }

    pub fn remote(&self) -> RemoteConfig {
        self.remote.clone().unwrap_or_default()
    }

    pub fn export(&self) -> ExportConfig {
        self.export.clone().unwrap_or_default()
    }

    /// Presentation defaults handed to the built-in views.
    pub fn view_defaults(&self) -> ViewDefaults {
        let thresholds = self.thresholds();
        let display = self.display();
        ViewDefaults {
            thresholds: thresholds.risk_thresholds(),
            rate_ceiling: Some(thresholds.rate_ceiling),
            rate_decimals: display.rate_decimals,
            tier_palette: display.tier_palette(),
            category_palette: display.category_palette(),
        }
    }

    /// Apply `AMRSCOPE_*` overrides read through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("AMRSCOPE_RATE_CEILING") {
            match raw.trim().parse::<f64>() {
                Ok(ceiling) if validate_rate_ceiling(ceiling).is_ok() => {
                    self.thresholds
                        .get_or_insert_with(ThresholdsConfig::default)
                        .rate_ceiling = ceiling;
                }
                _ => log::warn!("Ignoring invalid AMRSCOPE_RATE_CEILING value {raw:?}"),
            }
        }

        if let Some(endpoint) = lookup("AMRSCOPE_REMOTE_ENDPOINT") {
            let endpoint = endpoint.trim();
            if !endpoint.is_empty() {
                self.remote.get_or_insert_with(RemoteConfig::default).endpoint =
                    Some(endpoint.to_string());
            }
        }
    }
}
