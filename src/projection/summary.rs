//! Summary aggregation over derived records.
//!
//! Pure reductions feeding the dashboard's summary cards. Kept separate from
//! per-record projection so each statistic can be verified on its own.

use super::record::DerivedRecord;
use super::tiers::RiskTier;
use serde::{Deserialize, Serialize};

/// Record counts per risk tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierDistribution {
    pub low: usize,
    pub moderate: usize,
    pub high: usize,
}

/// Aggregate statistics for one projection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub count: usize,
    pub total_value: f64,
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub spread: f64,
    /// Records at or above the high threshold
    pub high_count: usize,
    pub total_isolates: u64,
    pub tier_distribution: TierDistribution,
    /// Name of the record with the largest value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highest: Option<String>,
}

/// Calculates all summary statistics.
pub fn summarize(records: &[DerivedRecord], high_threshold: f64) -> ProjectionSummary {
    if records.is_empty() {
        return ProjectionSummary::default();
    }

    let min = find_min_value(records);
    let max = find_max_value(records);

    ProjectionSummary {
        count: records.len(),
        total_value: records.iter().map(|r| r.adjusted_value).sum(),
        average: calculate_average(records),
        min,
        max,
        spread: max - min,
        high_count: count_at_or_above(records, high_threshold),
        total_isolates: total_isolates(records),
        tier_distribution: calculate_tier_distribution(records),
        highest: find_highest(records).map(|r| r.name.clone()),
    }
}

pub fn calculate_average(records: &[DerivedRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }

    let total: f64 = records.iter().map(|r| r.adjusted_value).sum();
    total / records.len() as f64
}

pub fn count_at_or_above(records: &[DerivedRecord], threshold: f64) -> usize {
    records
        .iter()
        .filter(|r| r.adjusted_value >= threshold)
        .count()
}

pub fn find_min_value(records: &[DerivedRecord]) -> f64 {
    records
        .iter()
        .map(|r| r.adjusted_value)
        .reduce(f64::min)
        .unwrap_or(0.0)
}

pub fn find_max_value(records: &[DerivedRecord]) -> f64 {
    records
        .iter()
        .map(|r| r.adjusted_value)
        .reduce(f64::max)
        .unwrap_or(0.0)
}

pub fn total_isolates(records: &[DerivedRecord]) -> u64 {
    records.iter().filter_map(|r| r.isolate_count).sum()
}

/// First record holding the maximum value.
fn find_highest(records: &[DerivedRecord]) -> Option<&DerivedRecord> {
    records.iter().fold(None, |best, record| match best {
        Some(current) if current.adjusted_value >= record.adjusted_value => Some(current),
        _ => Some(record),
    })
}

fn calculate_tier_distribution(records: &[DerivedRecord]) -> TierDistribution {
    let mut dist = TierDistribution::default();

    for record in records {
        match record.tier {
            Some(RiskTier::Low) => dist.low += 1,
            Some(RiskTier::Moderate) => dist.moderate += 1,
            Some(RiskTier::High) => dist.high += 1,
            None => {}
        }
    }

    dist
}
