//! Terminal rendering of projections and summaries.

pub mod terminal;

pub use terminal::{emit, format_projection, format_summary};
