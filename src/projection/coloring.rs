use super::tiers::RiskTier;
use serde::{Deserialize, Serialize};

/// Colors for each risk tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierPalette {
    pub low: String,
    pub moderate: String,
    pub high: String,
}

impl Default for TierPalette {
    fn default() -> Self {
        Self {
            low: "#22c55e".to_string(),
            moderate: "#f59e0b".to_string(),
            high: "#ef4444".to_string(),
        }
    }
}

impl TierPalette {
    pub fn color(&self, tier: RiskTier) -> &str {
        match tier {
            RiskTier::Low => &self.low,
            RiskTier::Moderate => &self.moderate,
            RiskTier::High => &self.high,
        }
    }
}

/// Default palette for distribution (pie-of-parts) views.
pub fn default_category_palette() -> Vec<String> {
    [
        "#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#ec4899", "#14b8a6", "#f97316",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect()
}

/// How a view colors its derived records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum ColorStrategy {
    /// Color follows the record's risk tier.
    RiskTier { palette: TierPalette },
    /// Fixed entry per catalog position, cycling through `colors`.
    Palette { colors: Vec<String> },
}

impl Default for ColorStrategy {
    fn default() -> Self {
        ColorStrategy::RiskTier {
            palette: TierPalette::default(),
        }
    }
}

impl ColorStrategy {
    pub fn palette() -> Self {
        ColorStrategy::Palette {
            colors: default_category_palette(),
        }
    }

    /// Color for the record at catalog position `index` in tier `tier`.
    pub fn color_for(&self, index: usize, tier: RiskTier) -> String {
        match self {
            ColorStrategy::RiskTier { palette } => palette.color(tier).to_string(),
            ColorStrategy::Palette { colors } if colors.is_empty() => String::new(),
            ColorStrategy::Palette { colors } => colors[index % colors.len()].clone(),
        }
    }
}
