//! Output ordering for projected records.

use super::record::DerivedRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// How a view orders its derived records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOrder {
    /// Keep base catalog order.
    #[default]
    Catalog,
    /// Lexicographic by combined `"subject: modifier"` name.
    ByName,
    /// Descending by adjusted value with explicit 1-based ranks.
    Rank,
}

/// Orders records in place according to `order`.
pub fn order_records(records: &mut [DerivedRecord], order: RecordOrder) {
    match order {
        RecordOrder::Catalog => {}
        RecordOrder::ByName => sort_by_name(records),
        RecordOrder::Rank => assign_ranks(records),
    }
}

/// Sorts by name; stable, so duplicate names keep catalog order.
fn sort_by_name(records: &mut [DerivedRecord]) {
    records.sort_by(|a, b| a.name.cmp(&b.name));
}

/// Sorts by value descending (ties keep catalog order) and numbers ranks.
fn assign_ranks(records: &mut [DerivedRecord]) {
    records.sort_by(|a, b| {
        b.adjusted_value
            .partial_cmp(&a.adjusted_value)
            .unwrap_or(Ordering::Equal)
    });
    for (position, record) in records.iter_mut().enumerate() {
        record.rank = Some(position + 1);
    }
}
