//! CSV reading via polars.

use std::io::Cursor;

use fireems_model::{CellValue, Record};
use polars::prelude::*;

use crate::encoding::ensure_not_blank;
use crate::error::{ParseError, Result};

/// Read CSV text into column names and typed rows.
///
/// Every column is loaded as text and typed per cell with
/// [`CellValue::infer`], so identifiers such as `"007"` keep their padding.
/// Rows whose cells are all empty are skipped.
pub(crate) fn read_csv(text: &str) -> Result<(Vec<String>, Vec<Record>)> {
    ensure_not_blank(text)?;

    // polars takes its header from the first line, so leading blank lines go.
    let body = skip_leading_blank_lines(text);

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(body.as_bytes().to_vec()))
        .finish()
        .map_err(|e| ParseError::Csv {
            message: e.to_string(),
        })?;

    let columns: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    if columns.iter().all(|name| name.trim().is_empty()) {
        return Err(ParseError::Csv {
            message: "no header row".to_string(),
        });
    }

    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let mut record = Record::new();
        for (name, column) in columns.iter().zip(df.get_columns()) {
            let value = column.get(idx).map(any_to_cell).unwrap_or_default();
            record.insert(name.clone(), value);
        }
        if record.values().all(CellValue::is_empty) {
            continue;
        }
        rows.push(record);
    }

    tracing::debug!(columns = columns.len(), rows = rows.len(), "Read CSV");
    Ok((columns, rows))
}

fn skip_leading_blank_lines(text: &str) -> &str {
    let mut rest = text;
    while let Some((line, tail)) = rest.split_once('\n') {
        if !line.trim().is_empty() {
            break;
        }
        rest = tail;
    }
    rest
}

/// Convert a polars value into a cell value.
fn any_to_cell(value: AnyValue<'_>) -> CellValue {
    match value {
        AnyValue::Null => CellValue::Null,
        AnyValue::String(s) => CellValue::infer(s),
        AnyValue::StringOwned(s) => CellValue::infer(&s),
        AnyValue::Boolean(b) => CellValue::Bool(b),
        AnyValue::Int8(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int16(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int32(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int64(v) => CellValue::Number(v as f64),
        AnyValue::UInt8(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt16(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt32(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt64(v) => CellValue::Number(v as f64),
        AnyValue::Float32(v) => CellValue::Number(f64::from(v)),
        AnyValue::Float64(v) => CellValue::Number(v),
        other => CellValue::infer(&other.to_string()),
    }
}
