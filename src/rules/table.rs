use super::adjustment::{Adjustment, AdjustmentRule};
use super::resolver::{BaselineResolver, CategoryResolver, CompoundResolver, RuleResolver};
use crate::core::MetricRecord;
use crate::filters::{Filter, FilterCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::trace;

/// Per-view lookup from active filters to a numeric adjustment.
///
/// # Precedence
///
/// Resolution is independent of filter insertion order:
///
/// 1. compound rules (more conditions first, record-targeted first)
/// 2. single-category families in [`FilterCategory`] declaration order
///    (record-targeted first within a family)
/// 3. baseline rules with no conditions
///
/// The first matching rule wins; when nothing matches the identity
/// multiplier applies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "RuleList", into = "RuleList")]
pub struct RuleTable {
    compound: CompoundResolver,
    families: BTreeMap<FilterCategory, CategoryResolver>,
    baseline: BaselineResolver,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rules(rules: impl IntoIterator<Item = AdjustmentRule>) -> Self {
        let mut table = Self::new();
        for rule in rules {
            table.push(rule);
        }
        table
    }

    pub fn with_rule(mut self, rule: AdjustmentRule) -> Self {
        self.push(rule);
        self
    }

    pub fn push(&mut self, rule: AdjustmentRule) {
        match rule.family() {
            Some(category) => self
                .families
                .entry(category)
                .or_insert_with(|| CategoryResolver::new(category))
                .push(rule),
            None if rule.is_compound() => self.compound.push(rule),
            None => self.baseline.push(rule),
        }
    }

    /// Resolvers in precedence order.
    pub fn resolvers(&self) -> impl Iterator<Item = &dyn RuleResolver> {
        std::iter::once(&self.compound as &dyn RuleResolver)
            .chain(self.families.values().map(|r| r as &dyn RuleResolver))
            .chain(std::iter::once(&self.baseline as &dyn RuleResolver))
    }

    /// Adjustment for `record` under `filters`: first matching rule wins,
    /// identity when no rule matches.
    pub fn compute_multiplier(&self, record: &MetricRecord, filters: &[Filter]) -> Adjustment {
        self.matching_resolver(record, filters)
            .map(|(_, adjustment)| adjustment)
            .unwrap_or(Adjustment::IDENTITY)
    }

    /// Name of the resolver that decides `record`, with its adjustment.
    pub fn matching_resolver(
        &self,
        record: &MetricRecord,
        filters: &[Filter],
    ) -> Option<(String, Adjustment)> {
        let (name, adjustment) = self.resolvers().find_map(|resolver| {
            resolver
                .resolve(record, filters)
                .map(|adjustment| (resolver.name(), adjustment))
        })?;
        trace!(resolver = %name, record = %record.name, ?adjustment, "rule matched");
        Some((name, adjustment))
    }

    pub fn len(&self) -> usize {
        self.resolvers().map(|r| r.rules().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All rules in evaluation order.
    pub fn rules(&self) -> Vec<&AdjustmentRule> {
        self.resolvers().flat_map(|r| r.rules().iter()).collect()
    }
}

/// Flat serialized form of a [`RuleTable`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RuleList {
    #[serde(default)]
    rules: Vec<AdjustmentRule>,
}

impl From<RuleList> for RuleTable {
    fn from(list: RuleList) -> Self {
        RuleTable::from_rules(list.rules)
    }
}

impl From<RuleTable> for RuleList {
    fn from(table: RuleTable) -> Self {
        RuleList {
            rules: table.rules().into_iter().cloned().collect(),
        }
    }
}
