//! Individual transformation steps.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use fireems_model::{CellValue, FieldTransformation, TransformKind};
use regex::Regex;

use crate::error::{Result, TransformError};
use crate::format::{NUMBER_FORMATS, cell_to_datetime, format_date, format_number};

/// Values treated as `true` by `convert` to boolean.
const TRUE_VALUES: [&str; 4] = ["true", "yes", "1", "y"];

/// Compiled patterns reused across the rows of one pass.
#[derive(Debug, Default)]
pub struct RegexCache {
    compiled: HashMap<String, Regex>,
}

impl RegexCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, pattern: &str) -> Result<&Regex> {
        match self.compiled.entry(pattern.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let regex = Regex::new(pattern).map_err(|e| TransformError::InvalidRegex {
                    pattern: pattern.to_string(),
                    message: e.to_string(),
                })?;
                Ok(entry.insert(regex))
            }
        }
    }
}

/// Apply one transformation step.
///
/// Null input passes through untouched for every kind.
pub fn apply_transformation(
    value: &CellValue,
    transformation: &FieldTransformation,
    regexes: &mut RegexCache,
) -> Result<CellValue> {
    if value.is_null() {
        return Ok(CellValue::Null);
    }
    match &transformation.kind {
        TransformKind::Split => split(value, transformation),
        TransformKind::Join => Ok(join(value, transformation)),
        TransformKind::Format => format(value, transformation),
        TransformKind::Convert => convert(value, transformation),
        TransformKind::Extract => extract(value, transformation, regexes),
        TransformKind::Replace => replace(value, transformation, regexes),
        TransformKind::Unknown(name) => Err(TransformError::UnknownKind(name.clone())),
    }
}

fn split(value: &CellValue, transformation: &FieldTransformation) -> Result<CellValue> {
    if let CellValue::List(_) = value {
        return Err(TransformError::UnsupportedInput {
            kind: "split",
            found: value.type_name(),
        });
    }
    let text = value.to_string();
    let delimiter = transformation.param_str("delimiter").unwrap_or(",");
    let parts: Vec<&str> = if delimiter.is_empty() {
        text.char_indices()
            .map(|(idx, ch)| &text[idx..idx + ch.len_utf8()])
            .collect()
    } else {
        text.split(delimiter).collect()
    };

    match transformation.param_index("index") {
        Some(index) => {
            let part = usize::try_from(index)
                .ok()
                .and_then(|idx| parts.get(idx))
                .copied()
                .unwrap_or_default();
            Ok(CellValue::text(part))
        }
        None => Ok(CellValue::List(
            parts.into_iter().map(CellValue::text).collect(),
        )),
    }
}

fn join(value: &CellValue, transformation: &FieldTransformation) -> CellValue {
    match value {
        CellValue::List(items) => {
            let delimiter = transformation.param_str("delimiter").unwrap_or(", ");
            let joined = items
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(delimiter);
            CellValue::Text(joined)
        }
        other => other.clone(),
    }
}

fn format(value: &CellValue, transformation: &FieldTransformation) -> Result<CellValue> {
    let format = transformation
        .param_str("format")
        .ok_or(TransformError::MissingParam { param: "format" })?;
    let format_type = transformation
        .param_str("formatType")
        .or_else(|| transformation.param_str("type"))
        .unwrap_or(if NUMBER_FORMATS.contains(&format) {
            "number"
        } else {
            "date"
        });
    match format_type {
        "date" => format_date(value, format),
        "number" => format_number(value, format),
        other => Err(TransformError::UnknownOption {
            what: "format type",
            name: other.to_string(),
        }),
    }
}

fn convert(value: &CellValue, transformation: &FieldTransformation) -> Result<CellValue> {
    let Some(target_type) = transformation.param_str("targetType") else {
        return Ok(value.clone());
    };
    match target_type {
        "string" => Ok(CellValue::Text(value.to_string())),
        "number" => to_number(value),
        "boolean" => Ok(CellValue::Bool(is_truthy(value))),
        "date" => cell_to_datetime(value).map(CellValue::Date),
        other => Err(TransformError::UnknownOption {
            what: "target type",
            name: other.to_string(),
        }),
    }
}

fn to_number(value: &CellValue) -> Result<CellValue> {
    match value {
        CellValue::Number(_) => Ok(value.clone()),
        CellValue::Bool(b) => Ok(CellValue::Number(if *b { 1.0 } else { 0.0 })),
        other => other
            .as_f64()
            .map(CellValue::Number)
            .ok_or_else(|| TransformError::NotANumber {
                value: other.to_string(),
            }),
    }
}

fn is_truthy(value: &CellValue) -> bool {
    match value {
        CellValue::Bool(b) => *b,
        other => {
            let text = other.to_string().trim().to_lowercase();
            TRUE_VALUES.contains(&text.as_str())
        }
    }
}

fn extract(
    value: &CellValue,
    transformation: &FieldTransformation,
    regexes: &mut RegexCache,
) -> Result<CellValue> {
    let pattern = transformation
        .param_str("pattern")
        .ok_or(TransformError::MissingParam { param: "pattern" })?;
    let regex = regexes.get(pattern)?;
    let text = value.to_string();
    let captures = regex
        .captures(&text)
        .ok_or_else(|| TransformError::NoMatch {
            pattern: pattern.to_string(),
        })?;
    let matched = captures
        .get(1)
        .or_else(|| captures.get(0))
        .map(|m| m.as_str())
        .unwrap_or_default();
    Ok(CellValue::text(matched))
}

fn replace(
    value: &CellValue,
    transformation: &FieldTransformation,
    regexes: &mut RegexCache,
) -> Result<CellValue> {
    let from = transformation
        .param_str("from")
        .ok_or(TransformError::MissingParam { param: "from" })?;
    let to = transformation.param_str("to").unwrap_or_default();
    let text = value.to_string();

    if transformation.param_bool("useRegex").unwrap_or(false) {
        let regex = regexes.get(from)?;
        return Ok(CellValue::Text(regex.replace_all(&text, to).into_owned()));
    }
    if from.is_empty() {
        return Ok(value.clone());
    }
    Ok(CellValue::Text(text.replace(from, to)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(value: CellValue, transformation: FieldTransformation) -> Result<CellValue> {
        apply_transformation(&value, &transformation, &mut RegexCache::new())
    }

    #[test]
    fn test_split_with_and_without_index() {
        let value = CellValue::text("Engine 1|Medic 2");
        assert_eq!(
            run(value.clone(), FieldTransformation::split("|", Some(1))).unwrap(),
            CellValue::text("Medic 2")
        );
        assert_eq!(
            run(value.clone(), FieldTransformation::split("|", Some(5))).unwrap(),
            CellValue::text("")
        );
        assert_eq!(
            run(value, FieldTransformation::split("|", None)).unwrap(),
            CellValue::List(vec![CellValue::text("Engine 1"), CellValue::text("Medic 2")])
        );
    }

    #[test]
    fn test_split_defaults_to_comma() {
        let transformation = FieldTransformation::new(TransformKind::Split).with_param("index", 0);
        assert_eq!(
            run(CellValue::text("a,b"), transformation).unwrap(),
            CellValue::text("a")
        );
    }

    #[test]
    fn test_join_passes_scalars_through() {
        let list = CellValue::List(vec![CellValue::text("E1"), CellValue::Number(2.0)]);
        assert_eq!(
            run(list, FieldTransformation::new(TransformKind::Join)).unwrap(),
            CellValue::text("E1, 2")
        );
        assert_eq!(
            run(CellValue::text("E1"), FieldTransformation::join("-")).unwrap(),
            CellValue::text("E1")
        );
    }

    #[test]
    fn test_convert() {
        assert_eq!(
            run(CellValue::text(" 42 "), FieldTransformation::convert("number")).unwrap(),
            CellValue::Number(42.0)
        );
        assert!(matches!(
            run(CellValue::text("abc"), FieldTransformation::convert("number")),
            Err(TransformError::NotANumber { .. })
        ));
        for truthy in ["TRUE", "yes", "1", "Y"] {
            assert_eq!(
                run(CellValue::text(truthy), FieldTransformation::convert("boolean")).unwrap(),
                CellValue::Bool(true)
            );
        }
        assert_eq!(
            run(CellValue::text("no"), FieldTransformation::convert("boolean")).unwrap(),
            CellValue::Bool(false)
        );
        assert_eq!(
            run(CellValue::Number(7.5), FieldTransformation::convert("string")).unwrap(),
            CellValue::text("7.5")
        );
        assert!(matches!(
            run(CellValue::text("1/2/2024"), FieldTransformation::convert("date")).unwrap(),
            CellValue::Date(_)
        ));
    }

    #[test]
    fn test_extract_prefers_first_group() {
        assert_eq!(
            run(
                CellValue::text("Unit E12 on scene"),
                FieldTransformation::extract(r"Unit (\w+)")
            )
            .unwrap(),
            CellValue::text("E12")
        );
        assert_eq!(
            run(CellValue::text("call 911"), FieldTransformation::extract(r"\d+")).unwrap(),
            CellValue::text("911")
        );
        assert!(matches!(
            run(CellValue::text("x"), FieldTransformation::extract("(")),
            Err(TransformError::InvalidRegex { .. })
        ));
        assert!(matches!(
            run(CellValue::text("x"), FieldTransformation::extract(r"\d")),
            Err(TransformError::NoMatch { .. })
        ));
    }

    #[test]
    fn test_replace_literal_and_regex() {
        assert_eq!(
            run(
                CellValue::text("a.b.c"),
                FieldTransformation::replace(".", "-", false)
            )
            .unwrap(),
            CellValue::text("a-b-c")
        );
        assert_eq!(
            run(
                CellValue::text("E 1  M 2"),
                FieldTransformation::replace(r"\s+", "", true)
            )
            .unwrap(),
            CellValue::text("E1M2")
        );
        let no_to = FieldTransformation::new(TransformKind::Replace).with_param("from", "#");
        assert_eq!(
            run(CellValue::text("#12"), no_to).unwrap(),
            CellValue::text("12")
        );
    }

    #[test]
    fn test_null_and_unknown() {
        assert_eq!(
            run(CellValue::Null, FieldTransformation::convert("number")).unwrap(),
            CellValue::Null
        );
        assert!(matches!(
            run(
                CellValue::text("x"),
                FieldTransformation::new(TransformKind::Unknown("geocode".to_string()))
            ),
            Err(TransformError::UnknownKind(_))
        ));
    }
}
