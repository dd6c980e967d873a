//! Dashboard views: per-view configuration plus static base datasets.
//!
//! A [`ViewProfile`] bundles everything that differs between dashboard
//! views (option catalog, rule table, projection settings), so a single
//! generic [`DashboardSession`](crate::session::DashboardSession) can drive
//! any of them.

mod consumption;
mod demographics;
mod regional;
mod resistance;

use crate::core::MetricRecord;
use crate::errors::Error;
use crate::filters::{FilterCategory, OptionCatalog};
use crate::projection::{
    coloring::default_category_palette, ColorStrategy, MetricKind, ProjectionSettings,
    RecordOrder, RiskThresholds, TierPalette,
};
use crate::rules::RuleTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Built-in dashboard views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewId {
    ResistanceOverview,
    ResistanceProfile,
    AgeDistribution,
    RegionalRanking,
    AntimicrobialUse,
}

impl ViewId {
    pub const ALL: [ViewId; 5] = [
        ViewId::ResistanceOverview,
        ViewId::ResistanceProfile,
        ViewId::AgeDistribution,
        ViewId::RegionalRanking,
        ViewId::AntimicrobialUse,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ViewId::ResistanceOverview => "resistance-overview",
            ViewId::ResistanceProfile => "resistance-profile",
            ViewId::AgeDistribution => "age-distribution",
            ViewId::RegionalRanking => "regional-ranking",
            ViewId::AntimicrobialUse => "antimicrobial-use",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ViewId::ResistanceOverview => "Resistance Overview by Pathogen",
            ViewId::ResistanceProfile => "Resistance Profile (Pathogen x Antibiotic)",
            ViewId::AgeDistribution => "Isolate Distribution by Age Group",
            ViewId::RegionalRanking => "Regional Resistance Ranking",
            ViewId::AntimicrobialUse => "Antimicrobial Use by Class (DDD/1000 patient-days)",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ViewId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        ViewId::ALL
            .into_iter()
            .find(|id| id.key() == normalized)
            .ok_or_else(|| Error::UnknownView(s.to_string()))
    }
}

/// Presentation defaults applied to every built-in view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewDefaults {
    pub thresholds: RiskThresholds,
    pub rate_ceiling: Option<f64>,
    pub rate_decimals: u32,
    pub tier_palette: TierPalette,
    pub category_palette: Vec<String>,
}

impl Default for ViewDefaults {
    fn default() -> Self {
        Self {
            thresholds: RiskThresholds::default(),
            rate_ceiling: Some(crate::projection::metric::DEFAULT_RATE_CEILING),
            rate_decimals: crate::projection::metric::DEFAULT_RATE_DECIMALS,
            tier_palette: TierPalette::default(),
            category_palette: default_category_palette(),
        }
    }
}

impl ViewDefaults {
    fn rate(&self) -> MetricKind {
        MetricKind::Rate {
            ceiling: self.rate_ceiling,
            decimals: self.rate_decimals,
        }
    }

    fn tier_coloring(&self) -> ColorStrategy {
        ColorStrategy::RiskTier {
            palette: self.tier_palette.clone(),
        }
    }

    fn palette_coloring(&self) -> ColorStrategy {
        ColorStrategy::Palette {
            colors: self.category_palette.clone(),
        }
    }

    /// Rate view colored by risk tier.
    pub fn rate_settings(&self, order: RecordOrder) -> ProjectionSettings {
        ProjectionSettings {
            metric: self.rate(),
            coloring: self.tier_coloring(),
            order,
            thresholds: self.thresholds,
        }
    }

    /// Distribution view with one palette entry per category.
    pub fn count_settings(&self, order: RecordOrder) -> ProjectionSettings {
        ProjectionSettings {
            metric: MetricKind::Count,
            coloring: self.palette_coloring(),
            order,
            thresholds: self.thresholds,
        }
    }
}

/// Configuration object for one dashboard view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewProfile {
    pub id: String,
    pub title: String,
    pub catalog: OptionCatalog,
    pub rules: RuleTable,
    pub settings: ProjectionSettings,
    /// Backend column holding the distinct values of each remotely
    /// refreshable category
    #[serde(default)]
    pub remote_columns: BTreeMap<FilterCategory, String>,
}

impl ViewProfile {
    pub fn remote_column(&self, category: FilterCategory) -> Option<&str> {
        self.remote_columns.get(&category).map(String::as_str)
    }
}

/// A view's configuration with its static base dataset.
#[derive(Debug, Clone)]
pub struct ViewBundle {
    pub profile: ViewProfile,
    pub records: Vec<MetricRecord>,
}

/// Build a built-in view.
pub fn builtin(id: ViewId, defaults: &ViewDefaults) -> ViewBundle {
    match id {
        ViewId::ResistanceOverview => resistance::overview(defaults),
        ViewId::ResistanceProfile => resistance::profile(defaults),
        ViewId::AgeDistribution => demographics::age_distribution(defaults),
        ViewId::RegionalRanking => regional::ranking(defaults),
        ViewId::AntimicrobialUse => consumption::antimicrobial_use(defaults),
    }
}

/// Shared facility options used by several views.
pub(crate) const FACILITIES: &[(&str, &str)] = &[
    ("korle_bu", "Korle Bu Teaching Hospital"),
    ("komfo_anokye", "Komfo Anokye Teaching Hospital"),
    ("tamale", "Tamale Teaching Hospital"),
    ("cape_coast", "Cape Coast Teaching Hospital"),
];

pub(crate) const YEARS: &[(&str, &str)] = &[
    ("2021", "2021"),
    ("2022", "2022"),
    ("2023", "2023"),
    ("2024", "2024"),
];

pub(crate) fn profile(
    id: ViewId,
    catalog: OptionCatalog,
    rules: RuleTable,
    settings: ProjectionSettings,
) -> ViewProfile {
    ViewProfile {
        id: id.key().to_string(),
        title: id.title().to_string(),
        catalog,
        rules,
        settings,
        remote_columns: BTreeMap::new(),
    }
}
