//! Workbook parsing through `parse_file`, with workbooks written at test time.

use std::path::Path;

use fireems_ingest::{FileType, ParseError, ParseOptions, parse_file};
use fireems_model::CellValue;
use rust_xlsxwriter::Workbook;
use tempfile::tempdir;

fn write_incident_workbook(path: &Path) {
    let mut workbook = Workbook::new();

    let incidents = workbook.add_worksheet();
    incidents.set_name("Incidents").unwrap();
    for (col, header) in ["Incident ID", "Units", "Narrative"].iter().enumerate() {
        incidents.write_string(0, col as u16, *header).unwrap();
    }
    incidents.write_string(1, 0, "F24-001").unwrap();
    incidents.write_number(1, 1, 3).unwrap();
    incidents.write_string(1, 2, "Smoke showing").unwrap();
    // Second row stops after the first cell.
    incidents.write_string(2, 0, "F24-002").unwrap();

    let stations = workbook.add_worksheet();
    stations.set_name("Stations").unwrap();
    stations.write_string(0, 0, "Station ID").unwrap();
    stations.write_string(1, 0, "ST-1").unwrap();

    workbook.save(path).unwrap();
}

#[test]
fn only_first_sheet_is_read() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("incidents.xlsx");
    write_incident_workbook(&path);

    let parsed = parse_file(&path, &ParseOptions::default()).unwrap();

    assert_eq!(parsed.file_type, FileType::Excel);
    assert_eq!(parsed.columns, vec!["Incident ID", "Units", "Narrative"]);
    assert_eq!(parsed.data.len(), 2);
    assert!(parsed.data.iter().all(|row| !row.contains_key("Station ID")));
    assert_eq!(parsed.data[0]["Incident ID"], CellValue::text("F24-001"));
    assert_eq!(parsed.data[0]["Units"], CellValue::Number(3.0));
}

#[test]
fn missing_trailing_cells_are_absent_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("incidents.xlsx");
    write_incident_workbook(&path);

    let parsed = parse_file(&path, &ParseOptions::default()).unwrap();

    let short_row = &parsed.data[1];
    assert_eq!(short_row.len(), 1);
    assert_eq!(short_row["Incident ID"], CellValue::text("F24-002"));
    assert!(!short_row.contains_key("Units"));
    assert!(!short_row.contains_key("Narrative"));
}

#[test]
fn sheet_without_rows_is_an_empty_workbook() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("blank.xlsx");
    let mut workbook = Workbook::new();
    workbook.add_worksheet().set_name("Blank").unwrap();
    workbook.save(&path).unwrap();

    let error = parse_file(&path, &ParseOptions::default()).unwrap_err();

    assert!(
        matches!(error, ParseError::EmptyWorkbook { .. }),
        "unexpected error: {error}"
    );
}
