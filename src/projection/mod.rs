//! Pure projection from base records and active filters to derived records.
//!
//! ```text
//! &[MetricRecord]  +  &[Filter]  +  &RuleTable
//!        │
//!        ▼
//! ┌──────────────────┐
//! │    project()     │ ← ProjectionSettings (metric, coloring, order, tiers)
//! └──────────────────┘
//!        │
//!        ├─→ adjust_record()         ← rule lookup, clamp, rounding
//!        ├─→ classify + color        ← risk tier or palette entry
//!        ├─→ apply_shares()          ← percentage of total
//!        └─→ order_records()         ← catalog, by name, or rank
//!        │
//!        ▼
//! Vec<DerivedRecord>
//! ```
//!
//! The projection is total: it never fails and never mutates its inputs.
//! Unknown categories simply find no rule and keep the identity multiplier.

pub mod coloring;
pub mod metric;
pub mod ordering;
pub mod record;
pub mod summary;
pub mod tiers;

pub use coloring::{ColorStrategy, TierPalette};
pub use metric::MetricKind;
pub use ordering::{order_records, RecordOrder};
pub use record::DerivedRecord;
pub use summary::{summarize, ProjectionSummary, TierDistribution};
pub use tiers::{classify_tier, RiskThresholds, RiskTier};

use crate::core::MetricRecord;
use crate::filters::Filter;
use crate::rules::{Adjustment, RuleTable};
use metric::round_to;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Per-view projection behavior.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSettings {
    #[serde(default)]
    pub metric: MetricKind,
    #[serde(default)]
    pub coloring: ColorStrategy,
    #[serde(default)]
    pub order: RecordOrder,
    #[serde(default)]
    pub thresholds: RiskThresholds,
}

/// Projects `base` under `filters` into derived records.
pub fn project(
    base: &[MetricRecord],
    filters: &[Filter],
    rules: &RuleTable,
    settings: &ProjectionSettings,
) -> Vec<DerivedRecord> {
    let mut derived: Vec<DerivedRecord> = base
        .iter()
        .enumerate()
        .map(|(index, record)| derive_record(index, record, filters, rules, settings))
        .collect();

    apply_shares(&mut derived);
    order_records(&mut derived, settings.order);

    debug!(
        records = derived.len(),
        filters = filters.len(),
        "projection recomputed"
    );

    derived
}

fn derive_record(
    index: usize,
    record: &MetricRecord,
    filters: &[Filter],
    rules: &RuleTable,
    settings: &ProjectionSettings,
) -> DerivedRecord {
    let adjustment = rules.compute_multiplier(record, filters);
    let adjusted_value = adjust_record(record.base_value, adjustment, settings.metric);

    let tier = classify_tier(adjusted_value, &settings.thresholds);
    let color = settings.coloring.color_for(index, tier);

    DerivedRecord {
        name: record.display_name(),
        adjusted_value,
        base_value: record.base_value,
        adjustment,
        color,
        tier: settings.metric.is_rate().then_some(tier),
        percentage_of_total: None,
        isolate_count: record.total,
        resistant_count: resistant_count(record, adjustment, adjusted_value, settings.metric),
        rank: None,
    }
}

/// Applies `adjustment` and the metric's numeric policy to `base`.
///
/// A non-finite result (e.g. from a malformed rule table) falls back to the
/// base value.
pub fn adjust_record(base: f64, adjustment: Adjustment, metric: MetricKind) -> f64 {
    let adjusted = !adjustment.is_identity();
    let raw = if adjusted { adjustment.apply(base) } else { base };
    let raw = if raw.is_finite() { raw } else { base };
    metric.normalize(raw, adjusted)
}

/// Resistant isolates implied by an adjusted rate.
fn resistant_count(
    record: &MetricRecord,
    adjustment: Adjustment,
    adjusted_value: f64,
    metric: MetricKind,
) -> Option<u64> {
    let recomputed = match (metric, record.total) {
        (MetricKind::Rate { .. }, Some(total)) => {
            Some((total as f64 * adjusted_value / 100.0).round() as u64)
        }
        _ => None,
    };

    if adjustment.is_identity() {
        record.resistant_count.or(recomputed)
    } else {
        recomputed.or(record.resistant_count)
    }
}

/// Fills `percentage_of_total` when the value sum is positive.
fn apply_shares(records: &mut [DerivedRecord]) {
    let total: f64 = records.iter().map(|r| r.adjusted_value).sum();
    if total <= 0.0 {
        return;
    }
    for record in records.iter_mut() {
        record.percentage_of_total = Some(round_to(record.adjusted_value / total * 100.0, 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterCategory;
    use crate::rules::AdjustmentRule;
    use pretty_assertions::assert_eq;

    fn active(category: FilterCategory, value: &str) -> Filter {
        Filter {
            category,
            value: value.into(),
            label: String::new(),
        }
    }

    fn facility_rules() -> RuleTable {
        RuleTable::from_rules([
            AdjustmentRule::single(
                FilterCategory::Facility,
                "korle_bu",
                Adjustment::multiply(1.15),
            ),
            AdjustmentRule::single(FilterCategory::Ward, "icu", Adjustment::multiply(3.0)),
        ])
    }

    #[test]
    fn test_identity_projection() {
        let base = vec![
            MetricRecord::new("E. coli", 38.7),
            MetricRecord::new("S. aureus", 12.34),
        ];
        let derived = project(&base, &[], &facility_rules(), &ProjectionSettings::default());
        let values: Vec<f64> = derived.iter().map(|r| r.adjusted_value).collect();
        assert_eq!(values, vec![38.7, 12.34]);
        assert!(derived.iter().all(|r| !r.was_adjusted()));
    }

    #[test]
    fn test_facility_multiplier_moves_tier() {
        let base = vec![MetricRecord::new("E. coli", 38.7)];
        let settings = ProjectionSettings::default();

        let before = project(&base, &[], &facility_rules(), &settings);
        assert_eq!(before[0].tier, Some(RiskTier::Moderate));

        let filters = [active(FilterCategory::Facility, "korle_bu")];
        let after = project(&base, &filters, &facility_rules(), &settings);
        assert_eq!(after[0].adjusted_value, 44.5);
        assert_eq!(after[0].tier, Some(RiskTier::High));
        assert_eq!(after[0].color, "#ef4444");
    }

    #[test]
    fn test_clamps_rates_at_ceiling() {
        let base = vec![MetricRecord::new("K. pneumoniae", 60.0)];
        let filters = [active(FilterCategory::Ward, "icu")];
        let derived = project(&base, &filters, &facility_rules(), &ProjectionSettings::default());
        assert_eq!(derived[0].adjusted_value, 95.0);
    }

    #[test]
    fn test_counts_are_not_clamped() {
        let base = vec![MetricRecord::new("Isolates", 60.0)];
        let filters = [active(FilterCategory::Ward, "icu")];
        let settings = ProjectionSettings {
            metric: MetricKind::Count,
            coloring: ColorStrategy::palette(),
            ..Default::default()
        };
        let derived = project(&base, &filters, &facility_rules(), &settings);
        assert_eq!(derived[0].adjusted_value, 180.0);
        assert_eq!(derived[0].tier, None);
    }

    #[test]
    fn test_resistant_count_follows_adjusted_rate() {
        let base = vec![MetricRecord::new("E. coli", 40.0)
            .with_total(200)
            .with_resistant_count(80)];
        let rules = RuleTable::from_rules([AdjustmentRule::single(
            FilterCategory::Facility,
            "korle_bu",
            Adjustment::multiply(1.25),
        )]);
        let settings = ProjectionSettings::default();

        let plain = project(&base, &[], &rules, &settings);
        assert_eq!(plain[0].resistant_count, Some(80));
        assert_eq!(plain[0].isolate_count, Some(200));

        let filtered = project(
            &base,
            &[active(FilterCategory::Facility, "korle_bu")],
            &rules,
            &settings,
        );
        assert_eq!(filtered[0].adjusted_value, 50.0);
        assert_eq!(filtered[0].resistant_count, Some(100));
    }

    #[test]
    fn test_percentage_of_total() {
        let base = vec![MetricRecord::new("0-4", 25.0), MetricRecord::new("5-14", 75.0)];
        let settings = ProjectionSettings {
            metric: MetricKind::Count,
            coloring: ColorStrategy::palette(),
            ..Default::default()
        };
        let derived = project(&base, &[], &RuleTable::new(), &settings);
        assert_eq!(derived[0].percentage_of_total, Some(25.0));
        assert_eq!(derived[1].percentage_of_total, Some(75.0));
        assert_ne!(derived[0].color, derived[1].color);
    }

    #[test]
    fn test_non_finite_adjustment_falls_back_to_base() {
        assert_eq!(
            adjust_record(30.0, Adjustment::multiply(f64::NAN), MetricKind::clamped_rate()),
            30.0
        );
        assert_eq!(
            adjust_record(30.0, Adjustment::multiply(f64::INFINITY), MetricKind::Count),
            30.0
        );
    }

    #[test]
    fn test_palette_color_stays_with_catalog_position_when_ranked() {
        let base = vec![MetricRecord::new("low", 1.0), MetricRecord::new("high", 9.0)];
        let settings = ProjectionSettings {
            metric: MetricKind::Count,
            coloring: ColorStrategy::Palette {
                colors: vec!["#aaaaaa".into(), "#bbbbbb".into()],
            },
            order: RecordOrder::Rank,
            ..Default::default()
        };
        let derived = project(&base, &[], &RuleTable::new(), &settings);
        assert_eq!(derived[0].name, "high");
        assert_eq!(derived[0].color, "#bbbbbb");
        assert_eq!(derived[0].rank, Some(1));
    }

    #[test]
    fn test_settings_from_toml_with_bad_metric_still_project() {
        let negative: ProjectionSettings =
            toml::from_str("[metric]\nkind = \"rate\"\nceiling = -5.0\n").unwrap();
        let derived = project(
            &[MetricRecord::new("E. coli", 38.7)],
            &[],
            &RuleTable::new(),
            &negative,
        );
        assert_eq!(derived[0].adjusted_value, 38.7);

        let precise: ProjectionSettings =
            toml::from_str("[metric]\nkind = \"rate\"\ndecimals = 400\n").unwrap();
        let filters = [active(FilterCategory::Facility, "korle_bu")];
        let derived = project(
            &[MetricRecord::new("E. coli", 38.7)],
            &filters,
            &facility_rules(),
            &precise,
        );
        assert!(derived[0].adjusted_value.is_finite());
        assert_eq!(derived[0].adjusted_value, round_to(38.7 * 1.15, 6));
    }
}
