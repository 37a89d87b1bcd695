//! Narrative parser.
//!
//! Pulls structured values out of free-text CAD narrative columns with fixed
//! regular expressions. Every value carries a confidence between 0 and 1:
//! this is a best-effort extractor and the score tells the caller how far to
//! trust it.

mod error;
mod extract;
mod field;
mod patterns;

use std::collections::BTreeMap;

pub use error::NarrativeError;
pub use field::{NarrativeField, ParsedField};

/// Extract one field from `text`, or `None` if nothing matched.
pub fn parse_field(text: &str, field: NarrativeField) -> Option<ParsedField> {
    match field {
        NarrativeField::IncidentType => extract::incident_type(text),
        NarrativeField::ResponseTime => extract::response_time(text),
        NarrativeField::Location => extract::location(text),
        NarrativeField::DateTime => extract::date_time(text),
        NarrativeField::UnitsResources => extract::units_resources(text),
    }
}

/// Extract the requested fields from `text`, keyed by field id.
///
/// Fields with no match are left out of the result. Unknown ids are ignored.
pub fn generate_parsed_fields<S: AsRef<str>>(
    text: &str,
    field_ids: &[S],
) -> BTreeMap<String, ParsedField> {
    let mut parsed = BTreeMap::new();
    for id in field_ids {
        let id = id.as_ref();
        let field = match id.parse::<NarrativeField>() {
            Ok(field) => field,
            Err(error) => {
                tracing::debug!(%error, "Ignoring narrative field");
                continue;
            }
        };
        if let Some(value) = parse_field(text, field) {
            parsed.insert(field.as_str().to_string(), value);
        }
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_ids_round_trip() {
        for field in NarrativeField::ALL {
            assert_eq!(field.as_str().parse::<NarrativeField>().unwrap(), field);
        }
        assert!(matches!(
            "weather".parse::<NarrativeField>(),
            Err(NarrativeError::UnknownField(_))
        ));
    }

    #[test]
    fn test_unmatched_and_unknown_fields_are_omitted() {
        let parsed =
            generate_parsed_fields("Engine 3 cleared", &["location", "units_resources", "bogus"]);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed["units_resources"].value, "Engine 3");
    }
}
