//! Export adapters fed from real sessions.

use amrscope::export::{CsvWriter, CSV_COLUMNS};
use amrscope::{
    builtin, export_snapshot, DashboardSession, DerivedRecord, Error, ExportFormat, ExportWriter,
    ViewDefaults, ViewId,
};
use chrono::NaiveDate;
use indoc::indoc;
use pretty_assertions::assert_eq;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

#[test]
fn test_two_record_csv() {
    let records = vec![DerivedRecord::new("A", 12.3), DerivedRecord::new("B", 45.6)];
    let artifact = export_snapshot("demo", &records, ExportFormat::Csv, date()).unwrap();

    let expected = indoc! {r#"
        name,adjusted_value,risk_tier,color,percentage_of_total,isolate_count,resistant_count,rank
        "A",12.3,,"",,,,
        "B",45.6,,"",,,,
    "#};
    assert_eq!(String::from_utf8(artifact.bytes).unwrap(), expected);
    assert_eq!(artifact.file_name, "demo-2025-06-01.csv");
}

#[test]
fn test_ranked_session_csv_has_one_row_per_record() {
    let session = DashboardSession::from_bundle(builtin(
        ViewId::RegionalRanking,
        &ViewDefaults::default(),
    ));
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .write_records(session.derived())
        .unwrap();
    let text = String::from_utf8(buffer).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), session.derived().len() + 1);
    assert_eq!(lines[0], CSV_COLUMNS.join(","));
    assert_eq!(
        lines[1],
        r##""Greater Accra",42.3,"high","#ef4444",15.5,2140,905,1"##
    );
}

#[test]
fn test_json_export_round_trips() {
    let session = DashboardSession::from_bundle(builtin(
        ViewId::AgeDistribution,
        &ViewDefaults::default(),
    ));
    let artifact = export_snapshot(
        &session.profile().id,
        session.derived(),
        ExportFormat::Json,
        date(),
    )
    .unwrap();

    assert_eq!(artifact.file_name, "age-distribution-2025-06-01.json");
    assert_eq!(artifact.mime_type, "application/json");
    let parsed: Vec<DerivedRecord> = serde_json::from_slice(&artifact.bytes).unwrap();
    assert_eq!(parsed, session.snapshot());
}

#[test]
fn test_snapshot_formats_belong_to_the_renderer() {
    let err = export_snapshot("demo", &[], ExportFormat::Pdf, date()).unwrap_err();
    let err = err.downcast::<Error>().unwrap();
    assert_eq!(err.category(), "Export");
    assert!(err.to_string().contains("pdf"));
}
