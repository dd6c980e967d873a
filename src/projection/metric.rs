//! Numeric policy per metric kind.
//!
//! - Rates are clamped to `[0, ceiling]` and rounded to a fixed number of
//!   decimals (one by default).
//! - Counts are floored at zero and rounded to whole numbers; they are
//!   never clamped from above.
//!
//! Rounding only applies to values an adjustment actually changed, so an
//! unfiltered projection reproduces base values exactly.

use serde::{Deserialize, Serialize};

pub const DEFAULT_RATE_CEILING: f64 = 95.0;
pub const DEFAULT_RATE_DECIMALS: u32 = 1;
pub const MAX_RATE_DECIMALS: u32 = 6;

/// What the values of a view represent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MetricKind {
    /// Percentage such as a resistance rate.
    Rate {
        /// Upper clamp; `None` or a value that is not finite and positive disables clamping
        #[serde(default)]
        ceiling: Option<f64>,
        #[serde(default = "default_decimals")]
        decimals: u32,
    },
    /// Raw count such as isolates or defined daily doses.
    Count,
}

fn default_decimals() -> u32 {
    DEFAULT_RATE_DECIMALS
}

impl Default for MetricKind {
    fn default() -> Self {
        MetricKind::clamped_rate()
    }
}

impl MetricKind {
    /// Rate capped at 95% with one decimal.
    pub fn clamped_rate() -> Self {
        MetricKind::Rate {
            ceiling: Some(DEFAULT_RATE_CEILING),
            decimals: DEFAULT_RATE_DECIMALS,
        }
    }

    /// Rate without an upper cap.
    pub fn unclamped_rate() -> Self {
        MetricKind::Rate {
            ceiling: None,
            decimals: DEFAULT_RATE_DECIMALS,
        }
    }

    pub fn is_rate(&self) -> bool {
        matches!(self, MetricKind::Rate { .. })
    }

    /// Apply the clamp and rounding policy to `value`.
    ///
    /// `adjusted` tells whether a non-identity rule produced `value`.
    pub fn normalize(&self, value: f64, adjusted: bool) -> f64 {
        match *self {
            MetricKind::Rate { ceiling, decimals } => {
                let value = if adjusted {
                    round_to(value, decimals)
                } else {
                    value
                };
                let upper = ceiling
                    .filter(|c| c.is_finite() && *c > 0.0)
                    .unwrap_or(f64::INFINITY);
                value.max(0.0).min(upper)
            }
            MetricKind::Count => {
                let value = if adjusted { value.round() } else { value };
                value.max(0.0)
            }
        }
    }
}

/// Round half away from zero to `decimals` places, at most
/// [`MAX_RATE_DECIMALS`].
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals.min(MAX_RATE_DECIMALS) as i32);
    (value * scale).round() / scale
}
