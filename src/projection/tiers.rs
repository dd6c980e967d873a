//! Risk tier classification for resistance-rate-like values.
//!
//! Thresholds are inclusive at the lower bound of each tier:
//! `Low < low_max <= Moderate < moderate_max <= High`.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-level classification of a resistance rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Moderate => "Moderate",
            RiskTier::High => "High",
        }
    }

    /// Lowercase key used in exports.
    pub fn key(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Moderate => "moderate",
            RiskTier::High => "high",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tier boundaries in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Values below this are Low
    #[serde(default = "default_low_max")]
    pub low_max: f64,
    /// Values at or above this are High
    #[serde(default = "default_moderate_max")]
    pub moderate_max: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            low_max: default_low_max(),
            moderate_max: default_moderate_max(),
        }
    }
}

impl RiskThresholds {
    pub fn new(low_max: f64, moderate_max: f64) -> Self {
        Self {
            low_max,
            moderate_max,
        }
    }

    /// Boundaries must be finite, positive and strictly increasing.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.low_max.is_finite() && self.moderate_max.is_finite()) {
            return Err("risk thresholds must be finite".to_string());
        }
        if self.low_max <= 0.0 {
            return Err(format!("low_max must be positive, got {}", self.low_max));
        }
        if self.low_max >= self.moderate_max {
            return Err(format!(
                "low_max ({}) must be below moderate_max ({})",
                self.low_max, self.moderate_max
            ));
        }
        Ok(())
    }
}

fn default_low_max() -> f64 {
    20.0
}

fn default_moderate_max() -> f64 {
    40.0
}

/// Classify a value into a tier.
pub fn classify_tier(value: f64, thresholds: &RiskThresholds) -> RiskTier {
    if value >= thresholds.moderate_max {
        RiskTier::High
    } else if value >= thresholds.low_max {
        RiskTier::Moderate
    } else {
        RiskTier::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        let t = RiskThresholds::default();
        assert_eq!(classify_tier(19.999, &t), RiskTier::Low);
        assert_eq!(classify_tier(20.0, &t), RiskTier::Moderate);
        assert_eq!(classify_tier(39.999, &t), RiskTier::Moderate);
        assert_eq!(classify_tier(40.0, &t), RiskTier::High);
    }

    #[test]
    fn test_extremes() {
        let t = RiskThresholds::default();
        assert_eq!(classify_tier(0.0, &t), RiskTier::Low);
        assert_eq!(classify_tier(95.0, &t), RiskTier::High);
    }

    #[test]
    fn test_custom_thresholds() {
        let t = RiskThresholds::new(10.0, 30.0);
        assert_eq!(classify_tier(15.0, &t), RiskTier::Moderate);
        assert_eq!(classify_tier(30.0, &t), RiskTier::High);
    }

    #[test]
    fn test_validate() {
        assert!(RiskThresholds::default().validate().is_ok());
        assert!(RiskThresholds::new(40.0, 20.0).validate().is_err());
        assert!(RiskThresholds::new(0.0, 20.0).validate().is_err());
        assert!(RiskThresholds::new(f64::NAN, 20.0).validate().is_err());
    }

    #[test]
    fn test_tiers_are_ordered() {
        assert!(RiskTier::Low < RiskTier::Moderate);
        assert!(RiskTier::Moderate < RiskTier::High);
    }
}
