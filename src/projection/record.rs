use super::tiers::RiskTier;
use crate::rules::Adjustment;
use serde::{Deserialize, Serialize};

/// Per-item output of a projection, ready for rendering or export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedRecord {
    /// Combined `"subject: modifier"` name
    pub name: String,
    pub adjusted_value: f64,
    pub base_value: f64,
    pub adjustment: Adjustment,
    pub color: String,
    /// Present for rate views only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<RiskTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage_of_total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isolate_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resistant_count: Option<u64>,
    /// 1-based rank, set by rank-ordered views
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<usize>,
}

impl DerivedRecord {
    /// Bare record carrying only a name and value.
    pub fn new(name: impl Into<String>, adjusted_value: f64) -> Self {
        Self {
            name: name.into(),
            adjusted_value,
            base_value: adjusted_value,
            adjustment: Adjustment::IDENTITY,
            color: String::new(),
            tier: None,
            percentage_of_total: None,
            isolate_count: None,
            resistant_count: None,
            rank: None,
        }
    }

    pub fn with_tier(mut self, tier: RiskTier) -> Self {
        self.tier = Some(tier);
        self
    }

    pub fn with_isolate_count(mut self, isolates: u64) -> Self {
        self.isolate_count = Some(isolates);
        self
    }

    pub fn was_adjusted(&self) -> bool {
        !self.adjustment.is_identity()
    }
}
