use crate::config::RemoteConfig;
use crate::errors::Error;
use crate::filters::{FilterCategory, OptionCatalog};
use crate::remote::HttpCatalogFetcher;
use crate::session::DashboardSession;
use crate::views::{builtin, ViewDefaults, ViewId};
use anyhow::Result;
use colored::*;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct OptionsConfig {
    pub view: String,
    pub category: Option<String>,
    pub remote: bool,
    pub endpoint: Option<String>,
}

/// Option listing, optionally restricted to one category.
pub fn format_options(catalog: &OptionCatalog, only: Option<FilterCategory>) -> String {
    let mut out = String::new();
    for (category, options) in catalog.categories() {
        if only.is_some_and(|wanted| wanted != category) {
            continue;
        }
        out.push_str(&format!("{} ({})\n", options.label.bold(), category.key()));
        if options.options.is_empty() {
            out.push_str(&format!("  {}\n", "(no options)".dimmed()));
        }
        for option in &options.options {
            out.push_str(&format!("  {:<16} {}\n", option.value, option.label));
        }
    }
    out
}

fn parse_category(raw: &str) -> Result<FilterCategory, Error> {
    raw.parse::<FilterCategory>()
        .map_err(|e| Error::validation(e.to_string()))
}

pub fn show_options(
    config: OptionsConfig,
    defaults: &ViewDefaults,
    remote: &RemoteConfig,
) -> Result<()> {
    let id: ViewId = config.view.parse()?;
    let only = config.category.as_deref().map(parse_category).transpose()?;
    let mut session = DashboardSession::from_bundle(builtin(id, defaults));

    if config.remote {
        let endpoint = config
            .endpoint
            .or_else(|| remote.endpoint.clone())
            .ok_or_else(|| {
                Error::configuration(
                    "no remote endpoint configured (set [remote] endpoint, \
                     AMRSCOPE_REMOTE_ENDPOINT or --endpoint)",
                )
            })?;
        let fetcher = HttpCatalogFetcher::new(
            endpoint,
            remote.column_param.clone(),
            Duration::from_secs(remote.timeout_secs),
        )?;

        for category in refresh_targets(&session, only) {
            session.load_remote_options(category, &fetcher);
        }
    }

    print!("{}", format_options(session.catalog(), only));
    Ok(())
}

/// Categories to refresh: the requested one, else every category the view
/// maps to a backend column.
fn refresh_targets(
    session: &DashboardSession,
    only: Option<FilterCategory>,
) -> Vec<FilterCategory> {
    match only {
        Some(category) => vec![category],
        None => session.profile().remote_columns.keys().copied().collect(),
    }
}
