//! Rule-resolution strategies, one per rule family.
//!
//! Each resolver owns its rules pre-sorted into evaluation order, so lookup
//! is a linear scan that stops at the first match.

use super::adjustment::{Adjustment, AdjustmentRule};
use crate::core::MetricRecord;
use crate::filters::{Filter, FilterCategory};
use std::cmp::Reverse;
use std::fmt::Debug;

/// Resolves an adjustment for one record from the rules it owns.
pub trait RuleResolver: Debug {
    /// First matching rule's adjustment, if any.
    fn resolve(&self, record: &MetricRecord, filters: &[Filter]) -> Option<Adjustment> {
        first_match(self.rules(), record, filters)
    }

    /// Rules in evaluation order.
    fn rules(&self) -> &[AdjustmentRule];

    /// Short label used when tracing which resolver matched.
    fn name(&self) -> String;
}

fn first_match(
    rules: &[AdjustmentRule],
    record: &MetricRecord,
    filters: &[Filter],
) -> Option<Adjustment> {
    rules
        .iter()
        .find(|rule| rule.matches(record, filters))
        .map(|rule| rule.adjustment)
}

/// Rules with two or more filter conditions.
///
/// Evaluation order: more conditions first, record-targeted before
/// untargeted, then declaration order.
#[derive(Debug, Clone, Default)]
pub struct CompoundResolver {
    rules: Vec<AdjustmentRule>,
}

impl CompoundResolver {
    pub fn push(&mut self, rule: AdjustmentRule) {
        self.rules.push(rule);
        // stable: equal specificity keeps declaration order
        self.rules
            .sort_by_key(|r| Reverse((r.when.len(), r.target.len())));
    }
}

impl RuleResolver for CompoundResolver {
    fn rules(&self) -> &[AdjustmentRule] {
        &self.rules
    }

    fn name(&self) -> String {
        "compound".to_string()
    }
}

/// Single-condition rules for one category family.
#[derive(Debug, Clone)]
pub struct CategoryResolver {
    category: FilterCategory,
    rules: Vec<AdjustmentRule>,
}

impl CategoryResolver {
    pub fn new(category: FilterCategory) -> Self {
        Self {
            category,
            rules: Vec::new(),
        }
    }

    pub fn category(&self) -> FilterCategory {
        self.category
    }

    pub fn push(&mut self, rule: AdjustmentRule) {
        debug_assert_eq!(rule.family(), Some(self.category));
        self.rules.push(rule);
        self.rules.sort_by_key(|r| Reverse(r.target.len()));
    }
}

impl RuleResolver for CategoryResolver {
    fn resolve(&self, record: &MetricRecord, filters: &[Filter]) -> Option<Adjustment> {
        if !filters.iter().any(|f| f.category == self.category) {
            return None;
        }
        first_match(&self.rules, record, filters)
    }

    fn rules(&self) -> &[AdjustmentRule] {
        &self.rules
    }

    fn name(&self) -> String {
        self.category.key().to_string()
    }
}

/// Rules without filter conditions; consulted after every family.
#[derive(Debug, Clone, Default)]
pub struct BaselineResolver {
    rules: Vec<AdjustmentRule>,
}

impl BaselineResolver {
    pub fn push(&mut self, rule: AdjustmentRule) {
        self.rules.push(rule);
        self.rules.sort_by_key(|r| Reverse(r.target.len()));
    }
}

impl RuleResolver for BaselineResolver {
    fn rules(&self) -> &[AdjustmentRule] {
        &self.rules
    }

    fn name(&self) -> String {
        "baseline".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active(category: FilterCategory, value: &str) -> Filter {
        Filter {
            category,
            value: value.into(),
            label: String::new(),
        }
    }

    #[test]
    fn test_compound_orders_by_condition_count() {
        let mut resolver = CompoundResolver::default();
        resolver.push(AdjustmentRule::compound(
            &[(FilterCategory::Sex, "female"), (FilterCategory::AgeBand, "35-44")],
            Adjustment::multiply(1.2),
        ));
        resolver.push(AdjustmentRule::compound(
            &[
                (FilterCategory::Sex, "female"),
                (FilterCategory::AgeBand, "35-44"),
                (FilterCategory::Ward, "maternity"),
            ],
            Adjustment::multiply(1.5),
        ));

        let filters = [
            active(FilterCategory::Ward, "maternity"),
            active(FilterCategory::Sex, "female"),
            active(FilterCategory::AgeBand, "35-44"),
        ];
        let record = MetricRecord::new("E. coli", 20.0);
        assert_eq!(
            resolver.resolve(&record, &filters),
            Some(Adjustment::multiply(1.5))
        );
    }

    #[test]
    fn test_category_resolver_prefers_targeted_rules() {
        let mut resolver = CategoryResolver::new(FilterCategory::AgeBand);
        resolver.push(AdjustmentRule::single(
            FilterCategory::AgeBand,
            "neonates",
            Adjustment::multiply(1.1),
        ));
        resolver.push(
            AdjustmentRule::single(
                FilterCategory::AgeBand,
                "neonates",
                Adjustment::override_with(72.0),
            )
            .targeting(FilterCategory::Pathogen, "e_coli"),
        );

        let filters = [active(FilterCategory::AgeBand, "neonates")];
        let e_coli =
            MetricRecord::new("E. coli", 38.7).with_attribute(FilterCategory::Pathogen, "e_coli");
        let other = MetricRecord::new("S. aureus", 20.0);

        assert_eq!(
            resolver.resolve(&e_coli, &filters),
            Some(Adjustment::override_with(72.0))
        );
        assert_eq!(
            resolver.resolve(&other, &filters),
            Some(Adjustment::multiply(1.1))
        );
    }

    #[test]
    fn test_category_resolver_skips_without_active_category() {
        let mut resolver = CategoryResolver::new(FilterCategory::Ward);
        resolver.push(AdjustmentRule::single(
            FilterCategory::Ward,
            "icu",
            Adjustment::multiply(1.4),
        ));
        let record = MetricRecord::new("E. coli", 20.0);
        assert_eq!(
            resolver.resolve(&record, &[active(FilterCategory::Sex, "male")]),
            None
        );
    }

    #[test]
    fn test_resolver_names() {
        assert_eq!(CompoundResolver::default().name(), "compound");
        assert_eq!(CategoryResolver::new(FilterCategory::AgeBand).name(), "age_band");
        assert_eq!(BaselineResolver::default().name(), "baseline");
    }

    #[test]
    fn test_baseline_applies_without_filters() {
        let mut resolver = BaselineResolver::default();
        resolver.push(AdjustmentRule::baseline(Adjustment::multiply(0.9)));
        let record = MetricRecord::new("E. coli", 20.0);
        assert_eq!(resolver.resolve(&record, &[]), Some(Adjustment::multiply(0.9)));
    }
}
