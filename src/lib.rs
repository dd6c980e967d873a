// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod filters;
pub mod output;
pub mod projection;
pub mod remote;
pub mod rules;
pub mod session;
pub mod views;

// Re-export commonly used types
pub use crate::core::MetricRecord;

pub use crate::errors::{Error, Result};

pub use crate::filters::{Filter, FilterCategory, FilterSet, OptionCatalog};

pub use crate::rules::{Adjustment, AdjustmentRule, RuleTable};

pub use crate::projection::{
    classify_tier, project, summarize, DerivedRecord, MetricKind, ProjectionSettings,
    ProjectionSummary, RecordOrder, RiskThresholds, RiskTier,
};

pub use crate::session::DashboardSession;

pub use crate::views::{builtin, ViewBundle, ViewDefaults, ViewId, ViewProfile};

pub use crate::remote::{parse_options_response, CatalogFetcher, HttpCatalogFetcher};

pub use crate::export::{export_snapshot, ExportArtifact, ExportFormat, ExportWriter};
