//! Named checks referenced by `custom` validation rules.

use chrono::Local;
use fireems_model::{CellValue, parse_datetime};

/// A check resolved by name from a `custom` validation rule.
///
/// Returns `Some(message)` when the value fails. Closures taking the field
/// name and value, `Fn(&str, &CellValue) -> Option<String>`, implement it.
pub trait CustomCheck: Send + Sync {
    fn check(&self, field: &str, value: &CellValue) -> Option<String>;
}

impl<F> CustomCheck for F
where
    F: Fn(&str, &CellValue) -> Option<String> + Send + Sync,
{
    fn check(&self, field: &str, value: &CellValue) -> Option<String> {
        self(field, value)
    }
}

/// Latitude in decimal degrees, -90 to 90.
#[derive(Debug, Clone, Copy, Default)]
pub struct Latitude;

impl CustomCheck for Latitude {
    fn check(&self, field: &str, value: &CellValue) -> Option<String> {
        (!in_range(value, -90.0, 90.0))
            .then(|| format!("{field} must be a latitude between -90 and 90"))
    }
}

/// Longitude in decimal degrees, -180 to 180.
#[derive(Debug, Clone, Copy, Default)]
pub struct Longitude;

impl CustomCheck for Longitude {
    fn check(&self, field: &str, value: &CellValue) -> Option<String> {
        (!in_range(value, -180.0, 180.0))
            .then(|| format!("{field} must be a longitude between -180 and 180"))
    }
}

/// Dates must not be later than the current local time.
///
/// Values that are not dates pass; the type check reports those.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotFutureDate;

impl CustomCheck for NotFutureDate {
    fn check(&self, field: &str, value: &CellValue) -> Option<String> {
        let when = match value {
            CellValue::Date(dt) => *dt,
            CellValue::Text(text) => parse_datetime(text)?,
            _ => return None,
        };
        (when > Local::now().naive_local()).then(|| format!("{field} cannot be in the future"))
    }
}

fn in_range(value: &CellValue, min: f64, max: f64) -> bool {
    value
        .as_f64()
        .is_some_and(|number| (min..=max).contains(&number))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates() {
        assert_eq!(Latitude.check("Lat", &CellValue::Number(39.7)), None);
        assert!(Latitude.check("Lat", &CellValue::Number(91.0)).is_some());
        assert!(Latitude.check("Lat", &CellValue::text("north")).is_some());
        assert_eq!(Longitude.check("Lon", &CellValue::text("-104.99")), None);
        assert!(Longitude.check("Lon", &CellValue::Number(-180.5)).is_some());
    }

    #[test]
    fn test_not_future_date() {
        assert_eq!(NotFutureDate.check("When", &CellValue::text("2020-01-01")), None);
        assert_eq!(
            NotFutureDate.check("When", &CellValue::text("2999-01-01")),
            Some("When cannot be in the future".to_string())
        );
        assert_eq!(NotFutureDate.check("When", &CellValue::text("soon")), None);
    }

    #[test]
    fn test_closures_are_checks() {
        let even = |field: &str, value: &CellValue| {
            value
                .as_f64()
                .filter(|n| n % 2.0 != 0.0)
                .map(|_| format!("{field} must be even"))
        };
        assert_eq!(even.check("Units", &CellValue::Number(2.0)), None);
        assert!(even.check("Units", &CellValue::Number(3.0)).is_some());
    }
}
