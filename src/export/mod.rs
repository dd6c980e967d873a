//! Export sinks for a derived snapshot.
//!
//! Tabular formats are written here. Image and document snapshots of a
//! rendered chart belong to the rendering layer and are rejected with
//! [`Error::UnsupportedExport`].

mod csv;
mod json;

pub use self::csv::{CsvWriter, CSV_COLUMNS};
pub use self::json::JsonWriter;

use crate::errors::Error;
use crate::projection::DerivedRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

pub trait ExportWriter {
    fn write_records(&mut self, records: &[DerivedRecord]) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
    Png,
    Svg,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
            ExportFormat::Png => "image/png",
            ExportFormat::Svg => "image/svg+xml",
            ExportFormat::Pdf => "application/pdf",
        }
    }

    /// Whether the format is a picture of the rendered chart rather than
    /// the data behind it.
    pub fn is_snapshot(&self) -> bool {
        matches!(self, ExportFormat::Png | ExportFormat::Svg | ExportFormat::Pdf)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "png" => Ok(ExportFormat::Png),
            "svg" => Ok(ExportFormat::Svg),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(Error::unsupported_export(other)),
        }
    }
}

/// A named downloadable byte stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// `<view-id>-<YYYY-MM-DD>.<ext>`
pub fn artifact_file_name(view_id: &str, format: ExportFormat, date: NaiveDate) -> String {
    format!(
        "{}-{}.{}",
        view_id,
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Serialize `records` for download, with a CSV header row.
pub fn export_snapshot(
    view_id: &str,
    records: &[DerivedRecord],
    format: ExportFormat,
    date: NaiveDate,
) -> anyhow::Result<ExportArtifact> {
    export_snapshot_with_header(view_id, records, format, date, true)
}

pub fn export_snapshot_with_header(
    view_id: &str,
    records: &[DerivedRecord],
    format: ExportFormat,
    date: NaiveDate,
    include_header: bool,
) -> anyhow::Result<ExportArtifact> {
    let mut bytes = Vec::new();
    match format {
        ExportFormat::Csv => CsvWriter::new(&mut bytes)
            .with_header(include_header)
            .write_records(records)?,
        ExportFormat::Json => JsonWriter::new(&mut bytes).write_records(records)?,
        snapshot => return Err(Error::unsupported_export(snapshot.extension()).into()),
    }

    let artifact = ExportArtifact {
        file_name: artifact_file_name(view_id, format, date),
        mime_type: format.mime_type(),
        bytes,
    };
    info!(
        file = %artifact.file_name,
        records = records.len(),
        bytes = artifact.bytes.len(),
        "export prepared"
    );
    Ok(artifact)
}
