use crate::views::{builtin, ViewDefaults, ViewId};
use anyhow::Result;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;

/// Table of the built-in views.
pub fn format_views(defaults: &ViewDefaults) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["View", "Title", "Metric", "Records", "Filter categories"]);

    for id in ViewId::ALL {
        let bundle = builtin(id, defaults);
        let metric = if bundle.profile.settings.metric.is_rate() {
            "rate"
        } else {
            "count"
        };
        let categories: Vec<&str> = bundle
            .profile
            .catalog
            .categories()
            .map(|(category, _)| category.key())
            .collect();
        table.add_row(vec![
            id.key().to_string(),
            id.title().to_string(),
            metric.to_string(),
            bundle.records.len().to_string(),
            categories.join(", "),
        ]);
    }

    format!("{table}\n")
}

pub fn list_views(defaults: &ViewDefaults) -> Result<()> {
    print!("{}", format_views(defaults));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_view_is_listed() {
        let text = format_views(&ViewDefaults::default());
        for id in ViewId::ALL {
            assert!(text.contains(id.key()), "{id} missing");
        }
        assert!(text.contains("age_band, sex"));
    }
}
