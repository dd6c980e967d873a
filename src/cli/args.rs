use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "amrscope")]
#[command(about = "Filterable antimicrobial resistance and use dashboards", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to the nearest .amrscope.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the built-in dashboard views
    Views,

    /// Show the filter options a view offers
    Options {
        /// View id, e.g. resistance-overview
        view: String,

        /// Only show this category
        #[arg(long)]
        category: Option<String>,

        /// Refresh the options from the remote endpoint first
        #[arg(long)]
        remote: bool,

        /// Remote endpoint (overrides config and AMRSCOPE_REMOTE_ENDPOINT)
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Apply filters to a view and print or export the result
    Project {
        /// View id, e.g. resistance-overview
        view: String,

        /// Filter as category=value; repeatable, applied in order
        #[arg(short = 'f', long = "filter", value_name = "CATEGORY=VALUE")]
        filters: Vec<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: ProjectFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Save a dated export artifact into the configured export directory
        #[arg(long, conflicts_with = "output")]
        save: bool,

        /// Append summary statistics (table format only)
        #[arg(long)]
        summary: bool,

        /// Upper clamp for adjusted rates (overrides config)
        #[arg(long)]
        rate_ceiling: Option<f64>,
    },

    /// Write a default .amrscope.toml into the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProjectFormat {
    Table,
    Csv,
    Json,
}

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    Cli::parse()
}
