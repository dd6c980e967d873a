use crate::cli::ProjectFormat;
use crate::config::{validate_rate_ceiling, ExportConfig};
use crate::errors::Error;
use crate::export::{export_snapshot_with_header, ExportFormat};
use crate::output::{emit, format_projection, format_summary};
use crate::session::DashboardSession;
use crate::views::{builtin, ViewDefaults, ViewId};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub view: String,
    pub filters: Vec<String>,
    pub format: ProjectFormat,
    pub output: Option<PathBuf>,
    pub save: bool,
    pub summary: bool,
    pub rate_ceiling: Option<f64>,
}

/// Rendered projection plus the artifact name it would be saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedProjection {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Split a `category=value` selector.
pub fn parse_filter_arg(raw: &str) -> Result<(&str, &str), Error> {
    match raw.split_once('=') {
        Some((category, value)) if !category.trim().is_empty() && !value.trim().is_empty() => {
            Ok((category.trim(), value.trim()))
        }
        _ => Err(Error::validation(format!(
            "filter '{raw}' must look like category=value"
        ))),
    }
}

/// Build a session for `config.view` with every filter applied in order.
pub fn build_session(config: &ProjectConfig, defaults: &ViewDefaults) -> Result<DashboardSession> {
    let id: ViewId = config.view.parse()?;

    let mut defaults = defaults.clone();
    if let Some(ceiling) = config.rate_ceiling {
        validate_rate_ceiling(ceiling).map_err(Error::validation)?;
        defaults.rate_ceiling = Some(ceiling);
    }

    let mut session = DashboardSession::from_bundle(builtin(id, &defaults));
    for raw in &config.filters {
        let (category, value) = parse_filter_arg(raw)?;
        match session.add_filter(category, value) {
            Some(filter) => info!(label = %filter.label, "filter applied"),
            None => debug!(category, value, "filter ignored"),
        }
    }
    Ok(session)
}

pub fn render_projection(
    session: &DashboardSession,
    config: &ProjectConfig,
    export: &ExportConfig,
    date: NaiveDate,
) -> Result<RenderedProjection> {
    let profile = session.profile();
    let format = match config.format {
        ProjectFormat::Table => {
            let mut text = format_projection(
                &profile.title,
                &session.filters().labels(),
                session.derived(),
                profile.settings.metric,
            );
            if config.summary {
                text.push('\n');
                text.push_str(&format_summary(&session.summary(), profile.settings.metric));
            }
            return Ok(RenderedProjection {
                file_name: None,
                bytes: text.into_bytes(),
            });
        }
        ProjectFormat::Csv => ExportFormat::Csv,
        ProjectFormat::Json => ExportFormat::Json,
    };

    let artifact = export_snapshot_with_header(
        &profile.id,
        session.derived(),
        format,
        date,
        export.include_header,
    )?;
    Ok(RenderedProjection {
        file_name: Some(artifact.file_name),
        bytes: artifact.bytes,
    })
}

fn save_path(export: &ExportConfig, file_name: &str) -> PathBuf {
    export
        .directory
        .as_deref()
        .unwrap_or_else(|| Path::new("."))
        .join(file_name)
}

pub fn project_view(
    config: ProjectConfig,
    defaults: &ViewDefaults,
    export: &ExportConfig,
) -> Result<()> {
    let session = build_session(&config, defaults)?;
    let today = chrono::Local::now().date_naive();
    let rendered = render_projection(&session, &config, export, today)?;

    if config.save {
        let file_name = rendered.file_name.as_deref().ok_or_else(|| {
            Error::validation("--save needs --format csv or --format json")
        })?;
        let path = save_path(export, file_name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, &rendered.bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Saved {}", path.display());
        return Ok(());
    }

    let text = String::from_utf8(rendered.bytes).context("Projection output is not UTF-8")?;
    emit(&text, config.output.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config(filters: &[&str], format: ProjectFormat) -> ProjectConfig {
        ProjectConfig {
            view: "resistance-overview".into(),
            filters: filters.iter().map(|f| f.to_string()).collect(),
            format,
            output: None,
            save: false,
            summary: false,
            rate_ceiling: None,
        }
    }

    #[test]
    fn test_parse_filter_arg() {
        assert_eq!(parse_filter_arg("facility=korle_bu").unwrap(), ("facility", "korle_bu"));
        assert_eq!(parse_filter_arg(" age = 65+ ").unwrap(), ("age", "65+"));
        assert!(parse_filter_arg("facility").is_err());
        assert!(parse_filter_arg("=icu").is_err());
    }

    #[test]
    fn test_unknown_filters_are_skipped() {
        let session = build_session(
            &config(&["facility=korle_bu", "planet=mars", "ward=nowhere"], ProjectFormat::Table),
            &ViewDefaults::default(),
        )
        .unwrap();
        assert_eq!(session.filters().len(), 1);
    }

    #[test]
    fn test_unknown_view_is_rejected() {
        let mut cfg = config(&[], ProjectFormat::Table);
        cfg.view = "heatmap".into();
        assert!(build_session(&cfg, &ViewDefaults::default()).is_err());
    }

    #[test]
    fn test_rate_ceiling_override() {
        let mut cfg = config(&["ward=icu"], ProjectFormat::Csv);
        cfg.view = "regional-ranking".into();
        cfg.filters = vec!["organism=a_baumannii".into()];
        cfg.rate_ceiling = Some(60.0);
        let session = build_session(&cfg, &ViewDefaults::default()).unwrap();
        assert_eq!(session.derived()[0].adjusted_value, 60.0);

        cfg.rate_ceiling = Some(150.0);
        assert!(build_session(&cfg, &ViewDefaults::default()).is_err());
    }

    #[test]
    fn test_csv_rendering_is_named_and_dated() {
        let cfg = config(&["facility=korle_bu"], ProjectFormat::Csv);
        let session = build_session(&cfg, &ViewDefaults::default()).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let rendered = render_projection(&session, &cfg, &ExportConfig::default(), date).unwrap();

        assert_eq!(
            rendered.file_name.as_deref(),
            Some("resistance-overview-2024-01-31.csv")
        );
        let text = String::from_utf8(rendered.bytes).unwrap();
        assert!(text.contains("\"E. coli\",44.5,\"high\""));
    }

    #[test]
    fn test_save_path_uses_export_directory() {
        let export = ExportConfig {
            directory: Some(PathBuf::from("exports")),
            include_header: true,
        };
        assert_eq!(
            save_path(&export, "a.csv"),
            PathBuf::from("exports").join("a.csv")
        );
        assert_eq!(
            save_path(&ExportConfig::default(), "a.csv"),
            PathBuf::from(".").join("a.csv")
        );
    }
}
