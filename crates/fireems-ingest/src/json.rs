//! JSON reading.

use fireems_model::{CellValue, Record};
use serde_json::{Map, Value};

use crate::encoding::ensure_not_blank;
use crate::error::{ParseError, Result};

/// Column used for array items that are not objects.
const SCALAR_COLUMN: &str = "value";

/// Read JSON into rows.
///
/// Accepts a top-level array of objects, an object whose first array-valued
/// property holds the rows, or a single object treated as one row. Columns are
/// the union of keys across the rows, in first-seen order.
pub(crate) fn read_json(text: &str) -> Result<(Vec<String>, Vec<Record>)> {
    ensure_not_blank(text)?;
    let value: Value = serde_json::from_str(text)?;

    let items: Vec<&Value> = match &value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(object) => match first_array_property(object) {
            Some((key, items)) => {
                tracing::debug!(property = %key, rows = items.len(), "Using array property as rows");
                items.iter().collect()
            }
            None => vec![&value],
        },
        _ => {
            return Err(ParseError::Json {
                message: "expected an array or an object at the top level".to_string(),
            });
        }
    };

    let mut columns: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(items.len());
    for item in items {
        let row = match item {
            Value::Object(object) => {
                for key in object.keys() {
                    push_unique(&mut columns, key);
                }
                object_to_record(object)
            }
            scalar => {
                push_unique(&mut columns, SCALAR_COLUMN);
                Record::from([(SCALAR_COLUMN.to_string(), CellValue::from_json(scalar))])
            }
        };
        rows.push(row);
    }
    Ok((columns, rows))
}

fn push_unique(columns: &mut Vec<String>, key: &str) {
    if !columns.iter().any(|column| column == key) {
        columns.push(key.to_string());
    }
}

fn first_array_property(object: &Map<String, Value>) -> Option<(&String, &Vec<Value>)> {
    object.iter().find_map(|(key, value)| match value {
        Value::Array(items) => Some((key, items)),
        _ => None,
    })
}

fn object_to_record(object: &Map<String, Value>) -> Record {
    object
        .iter()
        .map(|(key, value)| (key.clone(), CellValue::from_json(value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_array_union_columns() {
        let (columns, rows) =
            read_json(r#"[{"Unit":"E1","Minutes":4},{"Unit":"M2","Crew":3}]"#).unwrap();
        assert_eq!(columns, vec!["Unit", "Minutes", "Crew"]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Minutes"], CellValue::Number(4.0));
        assert!(!rows[0].contains_key("Crew"));
    }

    #[test]
    fn test_first_array_property() {
        let (columns, rows) =
            read_json(r#"{"meta":{"v":1},"incidents":[{"Id":1},{"Id":2}],"other":[1]}"#)
                .unwrap();
        assert_eq!(columns, vec!["Id"]);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_single_object_is_one_row() {
        let (columns, rows) = read_json(r#"{"Station":"1","Active":true}"#).unwrap();
        assert_eq!(columns, vec!["Station", "Active"]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Active"], CellValue::Bool(true));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(read_json("[{"), Err(ParseError::Json { .. })));
        assert!(matches!(read_json("42"), Err(ParseError::Json { .. })));
    }
}
