//! CLI module for amrscope
//!
//! - Argument parsing (`args`)
//! - Runtime setup: logging and configuration (`setup`)
//!
//! Command handlers live in [`crate::commands`].

pub mod args;
pub mod setup;

pub use args::{Cli, Commands, ProjectFormat};
pub use setup::{init_logging, load_configuration};

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    args::parse_args()
}
