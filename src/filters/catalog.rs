//! Category/value option catalogs.
//!
//! A catalog is injected per view: it lists which categories a view offers
//! and which values each category accepts, together with display labels.
//! Filter labels are precomputed from it when a filter is added.

use super::category::FilterCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One selectable value within a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Label and option list for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOptions {
    pub label: String,
    #[serde(default)]
    pub options: Vec<FilterOption>,
}

impl CategoryOptions {
    /// Find the display label for `value`.
    pub fn label_for(&self, value: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.value == value)
            .map(|option| option.label.as_str())
    }
}

/// Static per-view mapping `category -> { label, options }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionCatalog {
    categories: BTreeMap<FilterCategory, CategoryOptions>,
}

impl OptionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration of a category and its `(value, label)` pairs.
    pub fn with_category(
        mut self,
        category: FilterCategory,
        label: impl Into<String>,
        options: &[(&str, &str)],
    ) -> Self {
        self.categories.insert(
            category,
            CategoryOptions {
                label: label.into(),
                options: options
                    .iter()
                    .map(|(value, label)| FilterOption::new(*value, *label))
                    .collect(),
            },
        );
        self
    }

    pub fn category(&self, category: FilterCategory) -> Option<&CategoryOptions> {
        self.categories.get(&category)
    }

    /// Resolve `(category label, value label)`; `None` if either is unknown.
    pub fn lookup(&self, category: FilterCategory, value: &str) -> Option<(&str, &str)> {
        let options = self.categories.get(&category)?;
        let value_label = options.label_for(value)?;
        Some((options.label.as_str(), value_label))
    }

    /// Replace a category's options with plain strings, as returned by a
    /// remote distinct-values query. Each string is both value and label.
    pub fn replace_options(&mut self, category: FilterCategory, values: Vec<String>) {
        let entry = self
            .categories
            .entry(category)
            .or_insert_with(|| CategoryOptions {
                label: category.default_label().to_string(),
                options: Vec::new(),
            });
        entry.options = values
            .into_iter()
            .map(|value| FilterOption {
                label: value.clone(),
                value,
            })
            .collect();
    }

    /// Categories in precedence order.
    pub fn categories(&self) -> impl Iterator<Item = (FilterCategory, &CategoryOptions)> {
        self.categories.iter().map(|(category, options)| (*category, options))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
