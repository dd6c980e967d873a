//! Filter bookkeeping for dashboard views.
//!
//! - [`FilterCategory`]: the closed set of facets a filter can target
//! - [`OptionCatalog`]: per-view category/value options with display labels
//! - [`FilterSet`]: the ordered, de-duplicated active selections

pub mod catalog;
pub mod category;
pub mod set;

pub use catalog::{CategoryOptions, FilterOption, OptionCatalog};
pub use category::{FilterCategory, UnknownCategory};
pub use set::{Filter, FilterSet};
