//! Adjustment rules: map active filters to a multiplier or override.
//!
//! Rules are pure data. A [`RuleTable`] groups them into resolvers (one
//! compound resolver, one per category family, one baseline) and walks
//! those in a fixed precedence order.

pub mod adjustment;
pub mod resolver;
pub mod table;

pub use adjustment::{Adjustment, AdjustmentRule, Condition};
pub use resolver::{BaselineResolver, CategoryResolver, CompoundResolver, RuleResolver};
pub use table::RuleTable;
