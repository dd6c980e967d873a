use super::ExportWriter;
use crate::projection::DerivedRecord;
use std::io::Write;

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ExportWriter for JsonWriter<W> {
    fn write_records(&mut self, records: &[DerivedRecord]) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}
