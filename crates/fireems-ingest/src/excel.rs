//! Excel and OpenDocument workbook reading via calamine.

use std::io::Cursor;

use calamine::{Data, DataType, Reader, open_workbook_auto_from_rs};
use fireems_model::{CellValue, Record};

use crate::error::{ParseError, Result};

/// Read the first sheet of a workbook.
///
/// The first row is the header. Empty cells, including missing trailing
/// cells, leave their key absent from the row. Fully empty rows are skipped.
pub(crate) fn read_workbook(bytes: &[u8]) -> Result<(Vec<String>, Vec<Record>)> {
    if bytes.is_empty() {
        return Err(ParseError::EmptyFile);
    }
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

    let sheet_name = workbook.sheet_names().first().cloned();
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ParseError::EmptyWorkbook {
            reason: "no sheets".to_string(),
        })??;

    let mut rows_iter = range.rows();
    let header = rows_iter.next().ok_or_else(|| ParseError::EmptyWorkbook {
        reason: format!("sheet '{}' has no rows", sheet_name.as_deref().unwrap_or("1")),
    })?;
    let columns: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(idx, cell)| match cell_to_value(cell) {
            CellValue::Null => format!("Column {}", idx + 1),
            value => value.to_string().trim().to_string(),
        })
        .collect();
    if header.iter().all(|cell| matches!(cell, Data::Empty)) {
        return Err(ParseError::EmptyWorkbook {
            reason: "header row is empty".to_string(),
        });
    }

    let mut rows = Vec::new();
    for cells in rows_iter {
        let row: Record = columns
            .iter()
            .zip(cells.iter())
            .filter(|(_, cell)| !matches!(cell, Data::Empty))
            .map(|(name, cell)| (name.clone(), cell_to_value(cell)))
            .collect();
        if row.is_empty() {
            continue;
        }
        rows.push(row);
    }

    tracing::debug!(
        sheet = sheet_name.as_deref().unwrap_or_default(),
        columns = columns.len(),
        rows = rows.len(),
        "Read worksheet"
    );
    Ok((columns, rows))
}

/// Convert a calamine cell into a cell value.
fn cell_to_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(s) => CellValue::infer(s),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(_) | Data::DateTimeIso(_) => cell
            .as_datetime()
            .map_or_else(|| CellValue::text(cell.to_string()), CellValue::Date),
        Data::DurationIso(s) => CellValue::text(s.clone()),
        Data::Error(e) => {
            tracing::debug!(error = ?e, "Cell holds a formula error");
            CellValue::Null
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_value() {
        assert_eq!(cell_to_value(&Data::Int(7)), CellValue::Number(7.0));
        assert_eq!(
            cell_to_value(&Data::String("Engine 1".to_string())),
            CellValue::text("Engine 1")
        );
        assert_eq!(cell_to_value(&Data::Empty), CellValue::Null);
        assert_eq!(cell_to_value(&Data::Bool(true)), CellValue::Bool(true));
    }

    #[test]
    fn test_date_cell_becomes_date() {
        let cell = Data::DateTimeIso("2024-01-15T10:30:00".to_string());
        let expected = chrono::NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(cell_to_value(&cell), CellValue::Date(expected));
    }

    #[test]
    fn test_garbage_bytes_are_rejected() {
        assert!(matches!(
            read_workbook(b"not a workbook"),
            Err(ParseError::Excel { .. })
        ));
        assert!(matches!(read_workbook(b""), Err(ParseError::EmptyFile)));
    }
}
