use super::catalog::OptionCatalog;
use super::category::FilterCategory;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single active facet selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Filter {
    pub category: FilterCategory,
    pub value: String,
    /// Precomputed badge text, `"<CategoryLabel>: <ValueLabel>"`.
    pub label: String,
}

impl Filter {
    pub fn matches(&self, category: FilterCategory, value: &str) -> bool {
        self.category == category && self.value == value
    }
}

/// Ordered collection of active filters for one dashboard view.
///
/// Insertion order is preserved and only affects badge order. No two
/// filters share the same `(category, value)` pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    filters: im::Vector<Filter>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter whose labels are looked up in `catalog`.
    ///
    /// Unknown categories, unknown values and duplicates are no-ops and
    /// return `None`.
    pub fn add(
        &mut self,
        catalog: &OptionCatalog,
        category: &str,
        value: &str,
    ) -> Option<Filter> {
        let Ok(category) = category.parse::<FilterCategory>() else {
            debug!(category, value, "ignoring filter with unknown category");
            return None;
        };
        self.add_typed(catalog, category, value)
    }

    /// Same as [`FilterSet::add`] with an already parsed category.
    pub fn add_typed(
        &mut self,
        catalog: &OptionCatalog,
        category: FilterCategory,
        value: &str,
    ) -> Option<Filter> {
        let Some((category_label, value_label)) = catalog.lookup(category, value) else {
            debug!(%category, value, "ignoring filter not present in catalog");
            return None;
        };

        if self.contains(category, value) {
            debug!(%category, value, "ignoring duplicate filter");
            return None;
        }

        let filter = Filter {
            category,
            value: value.to_string(),
            label: format!("{category_label}: {value_label}"),
        };
        self.filters.push_back(filter.clone());
        Some(filter)
    }

    /// Remove the filter at `index`; out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) -> Option<Filter> {
        if index < self.filters.len() {
            Some(self.filters.remove(index))
        } else {
            None
        }
    }

    /// Remove the filter for `(category, value)` if present.
    pub fn remove_matching(&mut self, category: FilterCategory, value: &str) -> Option<Filter> {
        let index = self.filters.iter().position(|f| f.matches(category, value))?;
        self.remove(index)
    }

    pub fn clear(&mut self) {
        self.filters.clear();
    }

    pub fn contains(&self, category: FilterCategory, value: &str) -> bool {
        self.filters.iter().any(|f| f.matches(category, value))
    }

    /// Active values for one category, in insertion order.
    pub fn values_for(&self, category: FilterCategory) -> Vec<&str> {
        self.filters
            .iter()
            .filter(|f| f.category == category)
            .map(|f| f.value.as_str())
            .collect()
    }

    /// Badge texts in insertion order.
    pub fn labels(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.label.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Filter> {
        self.filters.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Filter> {
        self.filters.get(index)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Owned snapshot of the active filters.
    pub fn to_vec(&self) -> Vec<Filter> {
        self.filters.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn catalog() -> OptionCatalog {
        OptionCatalog::new()
            .with_category(
                FilterCategory::Facility,
                "Facility",
                &[("korle_bu", "Korle Bu"), ("komfo", "Komfo Anokye")],
            )
            .with_category(FilterCategory::Sex, "Sex", &[("female", "Female"), ("male", "Male")])
    }

    #[test]
    fn test_add_builds_label() {
        let mut set = FilterSet::new();
        let filter = set.add(&catalog(), "facility", "korle_bu").unwrap();
        assert_eq!(filter.label, "Facility: Korle Bu");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_duplicate_add_is_noop() {
        let mut set = FilterSet::new();
        let catalog = catalog();
        assert!(set.add(&catalog, "sex", "female").is_some());
        assert!(set.add(&catalog, "sex", "female").is_none());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_unknown_category_or_value_is_noop() {
        let mut set = FilterSet::new();
        let catalog = catalog();
        assert!(set.add(&catalog, "blood_group", "o").is_none());
        assert!(set.add(&catalog, "facility", "unknown").is_none());
        // known category that the catalog does not offer
        assert!(set.add(&catalog, "ward", "icu").is_none());
        assert!(set.is_empty());
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut set = FilterSet::new();
        let catalog = catalog();
        set.add(&catalog, "facility", "korle_bu");
        set.add(&catalog, "sex", "female");
        set.add(&catalog, "facility", "komfo");

        let removed = set.remove(1).unwrap();
        assert_eq!(removed.value, "female");
        assert_eq!(set.labels(), vec!["Facility: Korle Bu", "Facility: Komfo Anokye"]);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut set = FilterSet::new();
        set.add(&catalog(), "sex", "male");
        assert!(set.remove(5).is_none());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove_matching_and_values_for() {
        let mut set = FilterSet::new();
        let catalog = catalog();
        set.add(&catalog, "facility", "korle_bu");
        set.add(&catalog, "facility", "komfo");
        assert_eq!(set.values_for(FilterCategory::Facility), vec!["korle_bu", "komfo"]);

        set.remove_matching(FilterCategory::Facility, "korle_bu");
        assert_eq!(set.values_for(FilterCategory::Facility), vec!["komfo"]);
        assert!(set.remove_matching(FilterCategory::Sex, "male").is_none());
    }

    #[test]
    fn test_clear() {
        let mut set = FilterSet::new();
        let catalog = catalog();
        set.add(&catalog, "facility", "korle_bu");
        set.add(&catalog, "sex", "male");
        set.clear();
        assert!(set.is_empty());
    }
}
