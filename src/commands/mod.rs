//! CLI command implementations.
//!
//! - **views**: list the built-in dashboard views
//! - **options**: show (and optionally refresh) a view's filter options
//! - **project**: apply filters to a view and print or export the result
//! - **init**: write a default `.amrscope.toml`

pub mod init;
pub mod options;
pub mod project;
pub mod views;

pub use init::init_config;
pub use options::{show_options, OptionsConfig};
pub use project::{project_view, ProjectConfig};
pub use views::list_views;
