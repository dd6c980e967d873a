use crate::core::MetricRecord;
use crate::filters::{Filter, FilterCategory};
use serde::{Deserialize, Serialize};

/// What a matching rule does to a base value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Adjustment {
    /// Scale the base value.
    Multiply { factor: f64 },
    /// Replace the base value with a canonical figure.
    Override { value: f64 },
}

impl Adjustment {
    pub const IDENTITY: Adjustment = Adjustment::Multiply { factor: 1.0 };

    pub fn multiply(factor: f64) -> Self {
        Adjustment::Multiply { factor }
    }

    pub fn override_with(value: f64) -> Self {
        Adjustment::Override { value }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, Adjustment::Multiply { factor } if *factor == 1.0)
    }

    pub fn apply(&self, base: f64) -> f64 {
        match self {
            Adjustment::Multiply { factor } => base * factor,
            Adjustment::Override { value } => *value,
        }
    }
}

impl Default for Adjustment {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A `(category, value)` pair a rule requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub category: FilterCategory,
    pub value: String,
}

impl Condition {
    pub fn new(category: FilterCategory, value: impl Into<String>) -> Self {
        Self {
            category,
            value: value.into(),
        }
    }
}

/// Deterministic adjustment applied when all its filter conditions are active.
///
/// `target` optionally restricts the rule to records whose attributes match,
/// which is how a view expresses "neonates replace the rate for E. coli only".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentRule {
    #[serde(default)]
    pub when: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target: Vec<Condition>,
    pub adjustment: Adjustment,
}

impl AdjustmentRule {
    /// Rule keyed on a single filter.
    pub fn single(category: FilterCategory, value: &str, adjustment: Adjustment) -> Self {
        Self {
            when: vec![Condition::new(category, value)],
            target: Vec::new(),
            adjustment,
        }
    }

    /// Rule requiring every listed filter to be active.
    pub fn compound(conditions: &[(FilterCategory, &str)], adjustment: Adjustment) -> Self {
        Self {
            when: conditions
                .iter()
                .map(|(category, value)| Condition::new(*category, *value))
                .collect(),
            target: Vec::new(),
            adjustment,
        }
    }

    /// Rule that applies to every record regardless of filters.
    pub fn baseline(adjustment: Adjustment) -> Self {
        Self {
            when: Vec::new(),
            target: Vec::new(),
            adjustment,
        }
    }

    /// Restrict the rule to records with `category = value` in their attributes.
    pub fn targeting(mut self, category: FilterCategory, value: &str) -> Self {
        self.target.push(Condition::new(category, value));
        self
    }

    pub fn is_compound(&self) -> bool {
        self.when.len() > 1
    }

    pub fn is_targeted(&self) -> bool {
        !self.target.is_empty()
    }

    /// Single-condition rules belong to the family of their category.
    pub fn family(&self) -> Option<FilterCategory> {
        match self.when.as_slice() {
            [only] => Some(only.category),
            _ => None,
        }
    }

    pub fn matches(&self, record: &MetricRecord, filters: &[Filter]) -> bool {
        let conditions_active = self.when.iter().all(|condition| {
            filters
                .iter()
                .any(|filter| filter.matches(condition.category, &condition.value))
        });

        conditions_active
            && self
                .target
                .iter()
                .all(|t| record.attribute(t.category) == Some(t.value.as_str()))
    }
}
