//! Mapping completeness checks.

use std::collections::{BTreeMap, BTreeSet};

use fireems_model::{FieldMapping, TargetField};

use crate::error::{MappingError, MappingWarning};
use crate::score::score_target;
use crate::types::{MappingOptions, MappingValidation};

/// Check a mapping set against a destination schema with default options.
pub fn validate_field_mapping(
    mappings: &[FieldMapping],
    target_fields: &[TargetField],
) -> MappingValidation {
    validate_field_mapping_with(mappings, target_fields, &MappingOptions::default())
}

/// Check a mapping set against a destination schema.
///
/// Errors, in order: mappings to unknown targets, targets mapped more than
/// once, required targets with no mapping. Mappings whose source and target
/// names score at or below the low-confidence threshold produce warnings;
/// `__default__` mappings never do.
pub fn validate_field_mapping_with(
    mappings: &[FieldMapping],
    target_fields: &[TargetField],
    options: &MappingOptions,
) -> MappingValidation {
    let fields_by_name: BTreeMap<&str, &TargetField> = target_fields
        .iter()
        .map(|field| (field.name.as_str(), field))
        .collect();

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for mapping in mappings {
        match fields_by_name.get(mapping.target_field.as_str()) {
            None => errors.push(MappingError::UnknownTargetField {
                source_field: mapping.source_field.clone(),
                target_field: mapping.target_field.clone(),
            }),
            Some(field) if !mapping.is_default_source() => {
                let confidence = score_target(&mapping.source_field, field);
                if confidence <= options.low_confidence_threshold {
                    warnings.push(MappingWarning::LowConfidence {
                        source_field: mapping.source_field.clone(),
                        target_field: mapping.target_field.clone(),
                        confidence,
                    });
                }
            }
            Some(_) => {}
        }
    }

    // Target order of first appearance, with every source that writes it.
    let mut by_target: Vec<(&str, Vec<String>)> = Vec::new();
    for mapping in mappings {
        match by_target
            .iter_mut()
            .find(|(target, _)| *target == mapping.target_field)
        {
            Some((_, sources)) => sources.push(mapping.source_field.clone()),
            None => by_target.push((
                mapping.target_field.as_str(),
                vec![mapping.source_field.clone()],
            )),
        }
    }
    for (target, sources) in &by_target {
        if sources.len() > 1 {
            errors.push(MappingError::DuplicateTarget {
                target_field: (*target).to_string(),
                source_fields: sources.clone(),
            });
        }
    }

    let mapped: BTreeSet<&str> = by_target.iter().map(|(target, _)| *target).collect();
    for field in target_fields {
        if field.is_required && !mapped.contains(field.name.as_str()) {
            errors.push(MappingError::RequiredFieldUnmapped {
                field: field.name.clone(),
            });
        }
    }

    tracing::debug!(
        mappings = mappings.len(),
        errors = errors.len(),
        warnings = warnings.len(),
        "Checked field mapping"
    );

    MappingValidation {
        is_valid: errors.is_empty(),
        errors,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fireems_model::FieldDataType;

    fn schema() -> Vec<TargetField> {
        vec![
            TargetField::new("Incident ID", FieldDataType::String).required(),
            TargetField::new("Latitude", FieldDataType::Number),
            TargetField::new("Priority", FieldDataType::String),
        ]
    }

    #[test]
    fn test_valid_mapping() {
        let mappings = vec![
            FieldMapping::new("Incident ID", "Incident ID"),
            FieldMapping::new("Lat", "Latitude"),
        ];
        let result = validate_field_mapping(&mappings, &schema());
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_every_error_kind() {
        let mappings = vec![
            FieldMapping::new("Lat", "Latitude"),
            FieldMapping::new("Y", "Latitude"),
            FieldMapping::new("Zone", "District"),
        ];
        let result = validate_field_mapping(&mappings, &schema());

        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![
                MappingError::UnknownTargetField {
                    source_field: "Zone".to_string(),
                    target_field: "District".to_string(),
                },
                MappingError::DuplicateTarget {
                    target_field: "Latitude".to_string(),
                    source_fields: vec!["Lat".to_string(), "Y".to_string()],
                },
                MappingError::RequiredFieldUnmapped {
                    field: "Incident ID".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_low_confidence_warning_skips_defaults() {
        let mappings = vec![
            FieldMapping::new("Col7", "Incident ID"),
            FieldMapping::constant("Priority", "Medium", "string"),
        ];
        let result = validate_field_mapping(&mappings, &schema());

        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);
        assert!(matches!(
            &result.warnings[0],
            MappingWarning::LowConfidence { source_field, .. } if source_field == "Col7"
        ));
    }
}
