use crate::projection::{DerivedRecord, MetricKind, ProjectionSummary, RiskTier};
use anyhow::{Context, Result};
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Render a projection as a table, headed by the view title and the active
/// filter badges.
pub fn format_projection(
    title: &str,
    filter_labels: &[&str],
    records: &[DerivedRecord],
    metric: MetricKind,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", title.bold()));
    if filter_labels.is_empty() {
        out.push_str(&format!("{}\n", "No filters applied".dimmed()));
    } else {
        out.push_str(&format!("Filters: {}\n", filter_labels.join(" | ").cyan()));
    }
    out.push_str(&build_table(records, metric).to_string());
    out.push('\n');
    out
}

fn build_table(records: &[DerivedRecord], metric: MetricKind) -> Table {
    let ranked = records.iter().any(|r| r.rank.is_some());
    let with_isolates = records.iter().any(|r| r.isolate_count.is_some());
    let with_resistant = records.iter().any(|r| r.resistant_count.is_some());

    let mut header = Vec::new();
    if ranked {
        header.push("Rank");
    }
    header.push("Name");
    header.push(if metric.is_rate() { "Rate" } else { "Value" });
    if metric.is_rate() {
        header.push("Tier");
    }
    header.push("Share");
    if with_isolates {
        header.push("Isolates");
    }
    if with_resistant {
        header.push("Resistant");
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);

    for record in records {
        let mut row = Vec::new();
        if ranked {
            row.push(optional_cell(record.rank));
        }
        row.push(Cell::new(&record.name));
        row.push(Cell::new(format_value(record, metric)).set_alignment(CellAlignment::Right));
        if metric.is_rate() {
            row.push(tier_cell(record.tier));
        }
        row.push(
            Cell::new(
                record
                    .percentage_of_total
                    .map(|p| format!("{p:.1}%"))
                    .unwrap_or_default(),
            )
            .set_alignment(CellAlignment::Right),
        );
        if with_isolates {
            row.push(optional_cell(record.isolate_count));
        }
        if with_resistant {
            row.push(optional_cell(record.resistant_count));
        }
        table.add_row(row);
    }

    table
}

fn format_value(record: &DerivedRecord, metric: MetricKind) -> String {
    let marker = if record.was_adjusted() { "*" } else { "" };
    match metric {
        MetricKind::Rate { .. } => format!("{}%{marker}", record.adjusted_value),
        MetricKind::Count => format!("{}{marker}", record.adjusted_value),
    }
}

fn tier_cell(tier: Option<RiskTier>) -> Cell {
    match tier {
        Some(RiskTier::High) => Cell::new("High").fg(Color::Red),
        Some(RiskTier::Moderate) => Cell::new("Moderate").fg(Color::Yellow),
        Some(RiskTier::Low) => Cell::new("Low").fg(Color::Green),
        None => Cell::new(""),
    }
}

fn optional_cell<T: ToString>(value: Option<T>) -> Cell {
    Cell::new(value.map(|v| v.to_string()).unwrap_or_default())
        .set_alignment(CellAlignment::Right)
}

/// Summary card lines.
pub fn format_summary(summary: &ProjectionSummary, metric: MetricKind) -> String {
    let unit = if metric.is_rate() { "%" } else { "" };
    let mut lines = vec![
        format!("{}", "Summary".bold()),
        format!("  Records:   {}", summary.count),
        format!("  Average:   {:.2}{unit}", summary.average),
        format!(
            "  Range:     {}{unit} - {}{unit} (spread {:.1})",
            summary.min, summary.max, summary.spread
        ),
    ];

    if metric.is_rate() {
        let dist = summary.tier_distribution;
        lines.push(format!(
            "  High risk: {}",
            summary.high_count.to_string().red()
        ));
        lines.push(format!(
            "  Tiers:     {} low / {} moderate / {} high",
            dist.low, dist.moderate, dist.high
        ));
    } else {
        lines.push(format!("  Total:     {}", summary.total_value));
    }
    if summary.total_isolates > 0 {
        lines.push(format!("  Isolates:  {}", summary.total_isolates));
    }
    if let Some(highest) = &summary.highest {
        lines.push(format!("  Highest:   {}", highest.yellow()));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Print `output`, or write it to `path` when given.
pub fn emit(output: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            let mut file = fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            file.write_all(output.as_bytes())?;
        }
        None => print!("{output}"),
    }
    Ok(())
}
