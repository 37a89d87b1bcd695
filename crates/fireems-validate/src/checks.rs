//! Data type checks.

use fireems_model::{CellValue, FieldDataType, parse_datetime};

const BOOLEAN_WORDS: [&str; 8] = ["true", "false", "yes", "no", "1", "0", "y", "n"];

/// Check that a present value is representable as `data_type`.
///
/// Returns the failure message, or `None` if the value fits.
pub fn check_type(field: &str, data_type: FieldDataType, value: &CellValue) -> Option<String> {
    let fits = match data_type {
        FieldDataType::String => true,
        FieldDataType::Number => value.as_f64().is_some(),
        FieldDataType::Date => match value {
            CellValue::Date(_) => true,
            CellValue::Text(text) => parse_datetime(text).is_some(),
            _ => false,
        },
        FieldDataType::Boolean => match value {
            CellValue::Bool(_) => true,
            CellValue::Number(n) => *n == 0.0 || *n == 1.0,
            CellValue::Text(text) => {
                BOOLEAN_WORDS.contains(&text.trim().to_lowercase().as_str())
            }
            _ => false,
        },
        FieldDataType::Location => parse_location(value).is_some(),
    };
    (!fits).then(|| type_message(field, data_type))
}

fn type_message(field: &str, data_type: FieldDataType) -> String {
    match data_type {
        FieldDataType::String => format!("{field} must be text"),
        FieldDataType::Number => format!("{field} must be a number"),
        FieldDataType::Date => format!("{field} must be a valid date"),
        FieldDataType::Boolean => format!("{field} must be true or false"),
        FieldDataType::Location => {
            format!("{field} must be a location as \"latitude,longitude\"")
        }
    }
}

/// Read a location as `(latitude, longitude)`.
///
/// Accepts `"lat,lng"` text, a two-element list, or a JSON object with
/// `lat`/`lng` (or `latitude`/`longitude`) keys. Coordinates must be in range.
pub fn parse_location(value: &CellValue) -> Option<(f64, f64)> {
    let (lat, lng) = match value {
        CellValue::List(items) if items.len() == 2 => (items[0].as_f64()?, items[1].as_f64()?),
        CellValue::Text(text) if text.trim_start().starts_with('{') => location_object(text)?,
        CellValue::Text(text) => {
            let (lat, lng) = text.split_once(',')?;
            (lat.trim().parse().ok()?, lng.trim().parse().ok()?)
        }
        _ => return None,
    };
    ((-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng)).then_some((lat, lng))
}

fn location_object(text: &str) -> Option<(f64, f64)> {
    let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(text).ok()?;
    let coordinate = |keys: [&str; 2]| {
        keys.iter()
            .find_map(|key| object.get(*key))
            .and_then(|value| match value {
                serde_json::Value::Number(n) => n.as_f64(),
                serde_json::Value::String(s) => s.trim().parse().ok(),
                _ => None,
            })
    };
    Some((
        coordinate(["lat", "latitude"])?,
        coordinate(["lng", "longitude"])?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number() {
        assert_eq!(check_type("Lat", FieldDataType::Number, &CellValue::text("39.7")), None);
        assert_eq!(
            check_type("Lat", FieldDataType::Number, &CellValue::text("north")),
            Some("Lat must be a number".to_string())
        );
        assert!(check_type("Lat", FieldDataType::Number, &CellValue::Bool(true)).is_some());
    }

    #[test]
    fn test_date_and_boolean() {
        assert_eq!(
            check_type("When", FieldDataType::Date, &CellValue::text("01/15/2024 08:30")),
            None
        );
        assert!(check_type("When", FieldDataType::Date, &CellValue::Number(45000.0)).is_some());
        assert_eq!(check_type("Ok", FieldDataType::Boolean, &CellValue::text("Y")), None);
        assert!(check_type("Ok", FieldDataType::Boolean, &CellValue::text("maybe")).is_some());
    }

    #[test]
    fn test_location_forms() {
        assert_eq!(
            parse_location(&CellValue::text("39.74, -104.99")),
            Some((39.74, -104.99))
        );
        assert_eq!(
            parse_location(&CellValue::List(vec![
                CellValue::Number(39.74),
                CellValue::text("-104.99")
            ])),
            Some((39.74, -104.99))
        );
        assert_eq!(
            parse_location(&CellValue::text(r#"{"latitude": 39.74, "lng": "-104.99"}"#)),
            Some((39.74, -104.99))
        );
        assert_eq!(parse_location(&CellValue::text("139.74,-104.99")), None);
        assert_eq!(parse_location(&CellValue::text("downtown")), None);
    }
}
