//! Date and number formatting for the `format` transformation.

use chrono::NaiveDateTime;
use fireems_model::{CellValue, parse_datetime};

use crate::error::{Result, TransformError};

/// Named number formats.
pub const NUMBER_FORMATS: [&str; 4] = ["integer", "fixed2", "currency", "percent"];

/// Custom date tokens, longest first so `YYYY` wins over `YY`.
const DATE_TOKENS: [(&str, &str); 13] = [
    ("YYYY", "%Y"),
    ("YY", "%y"),
    ("MM", "%m"),
    ("M", "%-m"),
    ("DD", "%d"),
    ("D", "%-d"),
    ("HH", "%H"),
    ("H", "%-H"),
    ("hh", "%I"),
    ("h", "%-I"),
    ("mm", "%M"),
    ("ss", "%S"),
    ("A", "%p"),
];

/// Read a cell as a date/time.
pub fn cell_to_datetime(value: &CellValue) -> Result<NaiveDateTime> {
    match value {
        CellValue::Date(dt) => Ok(*dt),
        CellValue::Text(text) => parse_datetime(text).ok_or_else(|| TransformError::UnparseableDate {
            value: text.clone(),
        }),
        other => Err(TransformError::UnparseableDate {
            value: other.to_string(),
        }),
    }
}

/// Format a date value.
///
/// `format` is one of `MM/DD/YYYY`, `DD/MM/YYYY`, `YYYY-MM-DD`, `ISO`, or a
/// custom pattern built from `YYYY YY MM M DD D HH H hh h mm ss A`.
pub fn format_date(value: &CellValue, format: &str) -> Result<CellValue> {
    let dt = cell_to_datetime(value)?;
    let formatted = match format {
        "MM/DD/YYYY" => dt.format("%m/%d/%Y").to_string(),
        "DD/MM/YYYY" => dt.format("%d/%m/%Y").to_string(),
        "YYYY-MM-DD" => dt.format("%Y-%m-%d").to_string(),
        "ISO" => dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        custom => dt.format(&tokens_to_strftime(custom)).to_string(),
    };
    Ok(CellValue::Text(formatted))
}

/// Translate a token pattern into a chrono format string.
///
/// Characters that are not tokens are copied literally.
pub fn tokens_to_strftime(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;
    'outer: while !rest.is_empty() {
        for (token, spec) in DATE_TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(spec);
                rest = tail;
                continue 'outer;
            }
        }
        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            if ch == '%' {
                out.push_str("%%");
            } else {
                out.push(ch);
            }
        }
        rest = chars.as_str();
    }
    out
}

/// Format a numeric value as `integer`, `fixed2`, `currency` or `percent`.
///
/// `percent` treats the value as a ratio: `0.256` becomes `"25.6%"`.
pub fn format_number(value: &CellValue, format: &str) -> Result<CellValue> {
    let number = value.as_f64().ok_or_else(|| TransformError::NotANumber {
        value: value.to_string(),
    })?;
    match format {
        "integer" => Ok(CellValue::Number(number.round())),
        "fixed2" => Ok(CellValue::Text(format!("{number:.2}"))),
        "currency" => Ok(CellValue::Text(format_currency(number))),
        "percent" => Ok(CellValue::Text(format!("{:.1}%", number * 100.0))),
        other => Err(TransformError::UnknownOption {
            what: "number format",
            name: other.to_string(),
        }),
    }
}

fn format_currency(number: f64) -> String {
    let fixed = format!("{:.2}", number.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if number < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}${}.{cents}", group_thousands(whole))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::text(s)
    }

    #[test]
    fn test_named_date_formats() {
        let value = text("2024-03-07T14:05:09");
        assert_eq!(format_date(&value, "MM/DD/YYYY").unwrap(), text("03/07/2024"));
        assert_eq!(format_date(&value, "DD/MM/YYYY").unwrap(), text("07/03/2024"));
        assert_eq!(format_date(&value, "YYYY-MM-DD").unwrap(), text("2024-03-07"));
        assert_eq!(
            format_date(&value, "ISO").unwrap(),
            text("2024-03-07T14:05:09.000Z")
        );
    }

    #[test]
    fn test_custom_date_tokens() {
        let value = text("2024-03-07T14:05:09");
        assert_eq!(format_date(&value, "M/D/YY h:mm A").unwrap(), text("3/7/24 2:05 PM"));
        assert_eq!(format_date(&value, "YYYYMMDD-HHmmss").unwrap(), text("20240307-140509"));
        assert_eq!(tokens_to_strftime("100% D"), "100%% %-d");
    }

    #[test]
    fn test_unparseable_date() {
        assert!(matches!(
            format_date(&text("soon"), "ISO"),
            Err(TransformError::UnparseableDate { .. })
        ));
        assert!(format_date(&CellValue::Number(5.0), "ISO").is_err());
    }

    #[test]
    fn test_number_formats() {
        let value = CellValue::Number(1234.5);
        assert_eq!(format_number(&value, "integer").unwrap(), CellValue::Number(1235.0));
        assert_eq!(format_number(&value, "fixed2").unwrap(), text("1234.50"));
        assert_eq!(format_number(&value, "currency").unwrap(), text("$1,234.50"));
        assert_eq!(format_number(&text("0.256"), "percent").unwrap(), text("25.6%"));
        assert_eq!(
            format_number(&CellValue::Number(-1234567.891), "currency").unwrap(),
            text("-$1,234,567.89")
        );
    }

    #[test]
    fn test_number_format_rejects_text() {
        assert!(matches!(
            format_number(&text("n/a"), "fixed2"),
            Err(TransformError::NotANumber { .. })
        ));
        assert!(matches!(
            format_number(&CellValue::Number(1.0), "roman"),
            Err(TransformError::UnknownOption { .. })
        ));
    }
}
