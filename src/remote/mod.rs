//! Remote filter-option catalogs.
//!
//! A backend function returns the distinct values of one categorical
//! column as `{ "success": bool, "options": [..], "error": ".." }`. Every
//! failure mode (transport, non-2xx, malformed body, `success = false`)
//! degrades to an empty option list; nothing here is fatal.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Source of distinct values for a backend column.
pub trait CatalogFetcher {
    /// Distinct values of `column`, empty when the backend cannot deliver.
    fn fetch_options(&self, column: &str) -> Vec<String>;
}

/// Body shape returned by the options endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OptionsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Decode an options response.
///
/// `status_ok` is whether the transport reported a 2xx status.
pub fn parse_options_response(status_ok: bool, body: &str) -> Vec<String> {
    if !status_ok {
        warn!("options endpoint returned a non-success status, using empty list");
        return Vec::new();
    }

    let response: OptionsResponse = match serde_json::from_str(body) {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "malformed options response, using empty list");
            return Vec::new();
        }
    };

    if !response.success {
        warn!(
            error = response.error.as_deref().unwrap_or("unspecified"),
            "options endpoint reported failure, using empty list"
        );
        return Vec::new();
    }

    response.options.unwrap_or_default()
}

/// Blocking HTTP fetcher for the options endpoint.
#[derive(Debug, Clone)]
pub struct HttpCatalogFetcher {
    client: reqwest::blocking::Client,
    endpoint: String,
    column_param: String,
}

impl HttpCatalogFetcher {
    pub fn new(
        endpoint: impl Into<String>,
        column_param: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::remote(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            column_param: column_param.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request(&self, column: &str) -> Result<(bool, String)> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[(self.column_param.as_str(), column)])
            .send()
            .map_err(|e| Error::remote(format!("request to {} failed: {e}", self.endpoint)))?;

        let status_ok = response.status().is_success();
        let body = response
            .text()
            .map_err(|e| Error::remote(format!("failed to read response body: {e}")))?;
        Ok((status_ok, body))
    }
}

impl CatalogFetcher for HttpCatalogFetcher {
    fn fetch_options(&self, column: &str) -> Vec<String> {
        debug!(endpoint = %self.endpoint, column, "fetching remote options");
        match self.request(column) {
            Ok((status_ok, body)) => parse_options_response(status_ok, &body),
            Err(e) => {
                warn!(error = %e, column, "remote options unavailable, using empty list");
                Vec::new()
            }
        }
    }
}

/// Fixed answers keyed by column, for offline use and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogFetcher {
    columns: std::collections::BTreeMap<String, Vec<String>>,
}

impl StaticCatalogFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column(mut self, column: &str, values: &[&str]) -> Self {
        self.columns.insert(
            column.to_string(),
            values.iter().map(|v| v.to_string()).collect(),
        );
        self
    }
}

impl CatalogFetcher for StaticCatalogFetcher {
    fn fetch_options(&self, column: &str) -> Vec<String> {
        self.columns.get(column).cloned().unwrap_or_default()
    }
}
