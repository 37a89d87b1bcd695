//! Column type detection from sample rows.

use std::collections::BTreeMap;

use fireems_model::{CellValue, Record, is_datetime};

use crate::types::{DETECTION_SAMPLE_SIZE, DetectedType};

const BOOLEAN_WORDS: [&str; 6] = ["true", "false", "yes", "no", "y", "n"];

/// Guess a type for every column seen in the first 100 rows.
pub fn detect_field_types(rows: &[Record]) -> BTreeMap<String, DetectedType> {
    detect_field_types_sampled(rows, DETECTION_SAMPLE_SIZE)
}

/// Guess a type for every column seen in the first `sample_size` rows.
///
/// A column is `number` when every non-empty sampled value is numeric, then
/// `boolean`, then `datetime`, and `string` otherwise (including columns
/// with no non-empty values).
pub fn detect_field_types_sampled(
    rows: &[Record],
    sample_size: usize,
) -> BTreeMap<String, DetectedType> {
    let sample = &rows[..rows.len().min(sample_size)];

    let mut values: BTreeMap<&str, Vec<&CellValue>> = BTreeMap::new();
    for row in sample {
        for (column, value) in row {
            let entry = values.entry(column.as_str()).or_default();
            if !value.is_empty() {
                entry.push(value);
            }
        }
    }

    values
        .into_iter()
        .map(|(column, values)| (column.to_string(), classify(&values)))
        .collect()
}

fn classify(values: &[&CellValue]) -> DetectedType {
    if values.is_empty() {
        DetectedType::String
    } else if values.iter().all(|value| is_number(value)) {
        DetectedType::Number
    } else if values.iter().all(|value| is_boolean(value)) {
        DetectedType::Boolean
    } else if values.iter().all(|value| is_date(value)) {
        DetectedType::Datetime
    } else {
        DetectedType::String
    }
}

fn is_number(value: &CellValue) -> bool {
    matches!(value, CellValue::Number(_) | CellValue::Text(_)) && value.as_f64().is_some()
}

fn is_boolean(value: &CellValue) -> bool {
    match value {
        CellValue::Bool(_) => true,
        CellValue::Text(text) => {
            let lowered = text.trim().to_lowercase();
            BOOLEAN_WORDS.contains(&lowered.as_str())
        }
        _ => false,
    }
}

fn is_date(value: &CellValue) -> bool {
    match value {
        CellValue::Date(_) => true,
        CellValue::Text(text) => is_datetime(text),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, CellValue)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_empty_dataset() {
        assert!(detect_field_types(&[]).is_empty());
    }

    #[test]
    fn test_detects_each_type() {
        let rows = vec![
            row(&[
                ("Lat", CellValue::Number(39.7)),
                ("Cleared", CellValue::text("Yes")),
                ("Dispatched", CellValue::text("2024-01-15 08:30:00")),
                ("Unit", CellValue::text("E1")),
                ("Notes", CellValue::Null),
            ]),
            row(&[
                ("Lat", CellValue::text("39.8")),
                ("Cleared", CellValue::Bool(false)),
                ("Dispatched", CellValue::text("01/16/2024")),
                ("Unit", CellValue::text("42")),
            ]),
        ];

        let types = detect_field_types(&rows);

        assert_eq!(types["Lat"], DetectedType::Number);
        assert_eq!(types["Cleared"], DetectedType::Boolean);
        assert_eq!(types["Dispatched"], DetectedType::Datetime);
        assert_eq!(types["Unit"], DetectedType::String);
        assert_eq!(types["Notes"], DetectedType::String);
    }

    #[test]
    fn test_only_sample_is_scanned() {
        let mut rows = vec![row(&[("Code", CellValue::Number(1.0))]); 3];
        rows.push(row(&[("Code", CellValue::text("A"))]));
        assert_eq!(
            detect_field_types_sampled(&rows, 3)["Code"],
            DetectedType::Number
        );
        assert_eq!(detect_field_types(&rows)["Code"], DetectedType::String);
    }
}
