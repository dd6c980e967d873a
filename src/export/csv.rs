use super::ExportWriter;
use crate::projection::DerivedRecord;
use std::io::Write;

pub const CSV_COLUMNS: [&str; 8] = [
    "name",
    "adjusted_value",
    "risk_tier",
    "color",
    "percentage_of_total",
    "isolate_count",
    "resistant_count",
    "rank",
];

/// One row per record. Strings are always quoted, numbers never, absent
/// values are empty fields.
pub struct CsvWriter<W: Write> {
    writer: W,
    include_header: bool,
}

impl<W: Write> CsvWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            include_header: true,
        }
    }

    pub fn with_header(mut self, include_header: bool) -> Self {
        self.include_header = include_header;
        self
    }

    fn write_row(&mut self, fields: &[String]) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", fields.join(","))?;
        Ok(())
    }
}

impl<W: Write> ExportWriter for CsvWriter<W> {
    fn write_records(&mut self, records: &[DerivedRecord]) -> anyhow::Result<()> {
        if self.include_header {
            let header: Vec<String> = CSV_COLUMNS.iter().map(|c| c.to_string()).collect();
            self.write_row(&header)?;
        }

        for record in records {
            let row = [
                quote(&record.name),
                record.adjusted_value.to_string(),
                record
                    .tier
                    .map(|tier| quote(tier.key()))
                    .unwrap_or_default(),
                quote(&record.color),
                optional(record.percentage_of_total),
                optional(record.isolate_count),
                optional(record.resistant_count),
                optional(record.rank),
            ];
            self.write_row(&row)?;
        }

        self.writer.flush()?;
        Ok(())
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
