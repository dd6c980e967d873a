//! Base data points fed into the projection engine.

use crate::filters::FilterCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named base data point sourced from a static catalog or remote fetch.
///
/// Records are never mutated by the engine; projections derive new
/// [`DerivedRecord`](crate::projection::DerivedRecord)s from them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// Subject of the data point (organism, region, age band, drug class)
    pub name: String,
    /// Optional qualifier, e.g. the antibiotic tested against `name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<String>,
    pub base_value: f64,
    /// Category metadata used by record-targeted rules
    #[serde(default)]
    pub attributes: BTreeMap<FilterCategory, String>,
    /// Number of isolates tested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resistant_count: Option<u64>,
}

impl MetricRecord {
    pub fn new(name: impl Into<String>, base_value: f64) -> Self {
        Self {
            name: name.into(),
            modifier: None,
            base_value,
            attributes: BTreeMap::new(),
            total: None,
            resistant_count: None,
        }
    }

    pub fn with_modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifier = Some(modifier.into());
        self
    }

    pub fn with_attribute(mut self, category: FilterCategory, value: impl Into<String>) -> Self {
        self.attributes.insert(category, value.into());
        self
    }

    pub fn with_total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }

    pub fn with_resistant_count(mut self, resistant: u64) -> Self {
        self.resistant_count = Some(resistant);
        self
    }

    pub fn attribute(&self, category: FilterCategory) -> Option<&str> {
        self.attributes.get(&category).map(String::as_str)
    }

    /// `"subject: modifier"`, or just the subject when there is no modifier.
    pub fn display_name(&self) -> String {
        match &self.modifier {
            Some(modifier) => format!("{}: {}", self.name, modifier),
            None => self.name.clone(),
        }
    }
}
