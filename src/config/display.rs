use crate::projection::coloring::default_category_palette;
use crate::projection::metric::DEFAULT_RATE_DECIMALS;
use crate::projection::TierPalette;
use serde::{Deserialize, Serialize};

/// `[display]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Decimal places kept on adjusted rates (default: 1)
    #[serde(default = "default_rate_decimals")]
    pub rate_decimals: u32,

    /// Colors for distribution views, cycled by catalog position
    #[serde(default = "default_category_palette")]
    pub palette: Vec<String>,

    #[serde(default = "default_low_color")]
    pub low_color: String,

    #[serde(default = "default_moderate_color")]
    pub moderate_color: String,

    #[serde(default = "default_high_color")]
    pub high_color: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            rate_decimals: default_rate_decimals(),
            palette: default_category_palette(),
            low_color: default_low_color(),
            moderate_color: default_moderate_color(),
            high_color: default_high_color(),
        }
    }
}

impl DisplayConfig {
    pub fn tier_palette(&self) -> TierPalette {
        TierPalette {
            low: self.low_color.clone(),
            moderate: self.moderate_color.clone(),
            high: self.high_color.clone(),
        }
    }

    /// Configured palette, or the default one when the list is empty.
    pub fn category_palette(&self) -> Vec<String> {
        if self.palette.is_empty() {
            default_category_palette()
        } else {
            self.palette.clone()
        }
    }
}

fn default_rate_decimals() -> u32 {
    DEFAULT_RATE_DECIMALS
}

fn default_low_color() -> String {
    TierPalette::default().low
}

fn default_moderate_color() -> String {
    TierPalette::default().moderate
}

fn default_high_color() -> String {
    TierPalette::default().high
}
