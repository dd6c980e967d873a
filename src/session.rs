//! Per-view dashboard state.
//!
//! A [`DashboardSession`] owns everything one open view needs: its profile,
//! the base records, the active [`FilterSet`] and the current derived
//! snapshot. Every mutation recomputes the snapshot immediately, so readers
//! never observe a projection that lags behind the filters.

use crate::core::MetricRecord;
use crate::filters::{Filter, FilterCategory, FilterSet, OptionCatalog};
use crate::projection::{project, summarize, DerivedRecord, ProjectionSummary};
use crate::remote::CatalogFetcher;
use crate::views::{ViewBundle, ViewProfile};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct DashboardSession {
    profile: ViewProfile,
    records: Vec<MetricRecord>,
    filters: FilterSet,
    derived: Vec<DerivedRecord>,
}

impl DashboardSession {
    pub fn new(profile: ViewProfile, records: Vec<MetricRecord>) -> Self {
        let mut session = Self {
            profile,
            records,
            filters: FilterSet::new(),
            derived: Vec::new(),
        };
        session.recompute();
        session
    }

    pub fn from_bundle(bundle: ViewBundle) -> Self {
        Self::new(bundle.profile, bundle.records)
    }

    pub fn profile(&self) -> &ViewProfile {
        &self.profile
    }

    pub fn catalog(&self) -> &OptionCatalog {
        &self.profile.catalog
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn records(&self) -> &[MetricRecord] {
        &self.records
    }

    /// Current derived records.
    pub fn derived(&self) -> &[DerivedRecord] {
        &self.derived
    }

    /// Owned copy of the derived records for an export sink.
    pub fn snapshot(&self) -> Vec<DerivedRecord> {
        self.derived.clone()
    }

    /// Aggregates over the current derived records, with the view's high
    /// threshold.
    pub fn summary(&self) -> ProjectionSummary {
        summarize(&self.derived, self.profile.settings.thresholds.moderate_max)
    }

    /// Add a filter by category name. No-op (returns `None`) for unknown
    /// categories or values and for duplicates.
    pub fn add_filter(&mut self, category: &str, value: &str) -> Option<Filter> {
        let added = self.filters.add(&self.profile.catalog, category, value)?;
        self.recompute();
        Some(added)
    }

    pub fn add_filter_typed(&mut self, category: FilterCategory, value: &str) -> Option<Filter> {
        let added = self
            .filters
            .add_typed(&self.profile.catalog, category, value)?;
        self.recompute();
        Some(added)
    }

    pub fn remove_filter(&mut self, index: usize) -> Option<Filter> {
        let removed = self.filters.remove(index)?;
        self.recompute();
        Some(removed)
    }

    pub fn remove_matching(&mut self, category: FilterCategory, value: &str) -> Option<Filter> {
        let removed = self.filters.remove_matching(category, value)?;
        self.recompute();
        Some(removed)
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.recompute();
    }

    /// Swap in a new base dataset (e.g. one fetched remotely).
    pub fn set_records(&mut self, records: Vec<MetricRecord>) {
        self.records = records;
        self.recompute();
    }

    /// Replace `category`'s options with the values `fetcher` returns.
    ///
    /// The latest call wins. A failed fetch leaves the category with no
    /// options; filters that are already active stay active.
    pub fn load_remote_options(
        &mut self,
        category: FilterCategory,
        fetcher: &dyn CatalogFetcher,
    ) -> usize {
        let column = self
            .profile
            .remote_column(category)
            .unwrap_or(category.key())
            .to_string();
        let values = fetcher.fetch_options(&column);
        let count = values.len();

        info!(%category, column = %column, count, "loaded remote options");
        self.profile.catalog.replace_options(category, values);
        self.recompute();
        count
    }

    fn recompute(&mut self) {
        let filters = self.filters.to_vec();
        self.derived = project(
            &self.records,
            &filters,
            &self.profile.rules,
            &self.profile.settings,
        );
        debug!(view = %self.profile.id, filters = filters.len(), "session recomputed");
    }
}
