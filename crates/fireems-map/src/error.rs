//! Error and warning types for mapping checks.

use serde::Serialize;
use thiserror::Error;

/// A problem that makes a mapping set unusable until the user fixes it.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum MappingError {
    /// A required target field has no mapping.
    #[error("Required field '{field}' is not mapped")]
    RequiredFieldUnmapped { field: String },

    /// A mapping points at a field the destination schema does not have.
    #[error("Mapping from '{source_field}' targets unknown field '{target_field}'")]
    UnknownTargetField {
        source_field: String,
        target_field: String,
    },

    /// More than one mapping writes the same target field.
    #[error("Field '{target_field}' is mapped more than once (from {})", .source_fields.join(", "))]
    DuplicateTarget {
        target_field: String,
        source_fields: Vec<String>,
    },
}

impl MappingError {
    /// The target field the error is about.
    pub fn target_field(&self) -> &str {
        match self {
            Self::RequiredFieldUnmapped { field } => field,
            Self::UnknownTargetField { target_field, .. }
            | Self::DuplicateTarget { target_field, .. } => target_field,
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateTarget { .. })
    }
}

/// A mapping that is allowed but probably wrong.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum MappingWarning {
    /// Source and target names barely resemble each other.
    #[error("'{source_field}' -> '{target_field}' has a low similarity score ({confidence:.0})")]
    LowConfidence {
        source_field: String,
        target_field: String,
        confidence: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_lists_every_source() {
        let error = MappingError::DuplicateTarget {
            target_field: "Latitude".to_string(),
            source_fields: vec!["Lat".to_string(), "Y".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "Field 'Latitude' is mapped more than once (from Lat, Y)"
        );
        assert!(error.is_duplicate());
        assert_eq!(error.target_field(), "Latitude");
    }

    #[test]
    fn test_low_confidence_rounds_score() {
        let warning = MappingWarning::LowConfidence {
            source_field: "Col7".to_string(),
            target_field: "Incident ID".to_string(),
            confidence: 12.4,
        };
        assert_eq!(
            warning.to_string(),
            "'Col7' -> 'Incident ID' has a low similarity score (12)"
        );
    }
}
