use crate::projection::metric::DEFAULT_RATE_CEILING;
use crate::projection::RiskThresholds;
use serde::{Deserialize, Serialize};

/// `[thresholds]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdsConfig {
    /// Rates below this are Low (default: 20.0)
    #[serde(default = "default_low_max")]
    pub low_max: f64,

    /// Rates at or above this are High (default: 40.0)
    #[serde(default = "default_moderate_max")]
    pub moderate_max: f64,

    /// Upper clamp for adjusted rates in percent (default: 95.0)
    #[serde(default = "default_rate_ceiling")]
    pub rate_ceiling: f64,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            low_max: default_low_max(),
            moderate_max: default_moderate_max(),
            rate_ceiling: default_rate_ceiling(),
        }
    }
}

impl ThresholdsConfig {
    pub fn risk_thresholds(&self) -> RiskThresholds {
        RiskThresholds::new(self.low_max, self.moderate_max)
    }

    pub fn validate(&self) -> Result<(), String> {
        self.risk_thresholds().validate()?;
        validate_rate_ceiling(self.rate_ceiling)
    }
}

pub fn validate_rate_ceiling(ceiling: f64) -> Result<(), String> {
    if ceiling.is_finite() && ceiling > 0.0 && ceiling <= 100.0 {
        Ok(())
    } else {
        Err(format!("rate_ceiling must be in (0, 100], got {ceiling}"))
    }
}

fn default_low_max() -> f64 {
    20.0
}

fn default_moderate_max() -> f64 {
    40.0
}

fn default_rate_ceiling() -> f64 {
    DEFAULT_RATE_CEILING
}
