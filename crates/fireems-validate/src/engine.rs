//! Row-by-field validation pass.

use fireems_model::{FieldMapping, Record, TargetField, ValidationError, ValidationErrorKind};
use fireems_transform::{Diagnostic, transform_with_diagnostics};
use serde::Serialize;

use crate::checks::check_type;
use crate::context::ValidationContext;
use crate::rules::CompiledRule;

/// Validate rows against a destination schema.
///
/// For every row and every field, in that order:
/// 1. the row value is used, or the registered default if the value is empty;
/// 2. an empty value with no default is a `required` error for required fields;
/// 3. presence-only fields stop here;
/// 4. a type mismatch is a `custom` error and skips the field's rules;
/// 5. every rule runs and each failure is reported.
pub fn validate_data(
    rows: &[Record],
    fields: &[TargetField],
    context: &ValidationContext,
) -> Vec<ValidationError> {
    let compiled: Vec<(&TargetField, Vec<CompiledRule<'_>>)> = fields
        .iter()
        .map(|field| (field, CompiledRule::compile_all(field, context)))
        .collect();

    let mut errors = Vec::new();
    for (row_index, row) in rows.iter().enumerate() {
        for (field, rules) in &compiled {
            validate_value(row_index, row, field, rules, context, &mut errors);
        }
    }

    tracing::info!(
        rows = rows.len(),
        fields = fields.len(),
        errors = errors.len(),
        "Validated dataset"
    );
    errors
}

/// Validate rows with a context built from `mappings`.
///
/// The defaults are always taken from `mappings`, so they cannot drift from
/// the mapping set that produced `rows`.
pub fn validate_with_mappings(
    rows: &[Record],
    fields: &[TargetField],
    mappings: &[FieldMapping],
) -> Vec<ValidationError> {
    validate_data(rows, fields, &ValidationContext::from_mappings(mappings))
}

/// Transformed rows together with everything found while producing them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedData {
    pub data: Vec<Record>,
    pub errors: Vec<ValidationError>,
    /// Values that fell back to their pre-transformation form.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

/// Transform source rows with `mappings`, then validate the result.
///
/// The same default set feeds both stages.
pub fn transform_and_validate(
    rows: &[Record],
    fields: &[TargetField],
    mappings: &[FieldMapping],
) -> ValidatedData {
    let context = ValidationContext::from_mappings(mappings);
    let transformed = transform_with_diagnostics(rows, mappings, context.defaults());
    let errors = validate_data(&transformed.rows, fields, &context);
    ValidatedData {
        data: transformed.rows,
        errors,
        diagnostics: transformed.diagnostics,
    }
}

fn validate_value(
    row_index: usize,
    row: &Record,
    field: &TargetField,
    rules: &[CompiledRule<'_>],
    context: &ValidationContext,
    errors: &mut Vec<ValidationError>,
) {
    let raw = row.get(&field.name).filter(|value| !value.is_empty());
    let Some(value) = raw.or_else(|| context.default_value(&field.name)) else {
        if field.is_required {
            errors.push(ValidationError::new(
                row_index,
                &field.name,
                ValidationErrorKind::Required,
                format!("{} is required", field.name),
            ));
        }
        return;
    };
    // A registered default may itself be empty; it still satisfies presence.
    if field.presence_only || value.is_empty() {
        return;
    }

    if let Some(message) = check_type(&field.name, field.data_type, value) {
        errors.push(ValidationError::new(
            row_index,
            &field.name,
            ValidationErrorKind::Custom,
            message,
        ));
        return;
    }

    for rule in rules {
        if let Some(message) = rule.evaluate(field, value, context) {
            errors.push(ValidationError::new(row_index, &field.name, rule.kind(), message));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fireems_model::{CellValue, DefaultValueRegistry, FieldDataType, ValidationRule};

    fn row(pairs: &[(&str, CellValue)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_required_respects_defaults() {
        let fields = vec![TargetField::new("Priority", FieldDataType::String).required()];
        let rows = vec![row(&[("Priority", CellValue::text(""))]), row(&[])];

        let without = validate_data(&rows, &fields, &ValidationContext::new());
        assert_eq!(without.len(), 2);
        assert!(without.iter().all(|e| e.kind == ValidationErrorKind::Required));

        let mut defaults = DefaultValueRegistry::new();
        defaults.register_field("Priority", CellValue::text("Medium"));
        let with = validate_data(&rows, &fields, &ValidationContext::new().with_defaults(defaults));
        assert!(with.is_empty());
    }

    #[test]
    fn test_optional_empty_value_is_skipped() {
        let fields = vec![TargetField::new("Latitude", FieldDataType::Number)
            .with_rule(ValidationRule::custom("latitude"))];
        assert!(validate_data(&[row(&[])], &fields, &ValidationContext::new()).is_empty());
    }

    #[test]
    fn test_presence_only_skips_type_and_rules() {
        let fields = vec![
            TargetField::new("Incident Time", FieldDataType::Date)
                .required()
                .presence_only()
                .with_rule(ValidationRule::pattern("^never$")),
        ];
        let rows = vec![row(&[("Incident Time", CellValue::text("08:30"))])];
        assert!(validate_data(&rows, &fields, &ValidationContext::new()).is_empty());
    }

    #[test]
    fn test_type_mismatch_short_circuits_rules() {
        let fields = vec![TargetField::new("Latitude", FieldDataType::Number)
            .with_rule(ValidationRule::min(-90.0))
            .with_rule(ValidationRule::pattern("^[0-9.-]+$"))];
        let rows = vec![row(&[("Latitude", CellValue::text("north"))])];

        let errors = validate_data(&rows, &fields, &ValidationContext::new());

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::Custom);
        assert_eq!(errors[0].message, "Latitude must be a number");
    }

    #[test]
    fn test_errors_are_row_major_in_field_order() {
        let fields = vec![
            TargetField::new("Incident ID", FieldDataType::String).required(),
            TargetField::new("Units", FieldDataType::Number),
        ];
        let rows = vec![
            row(&[("Units", CellValue::text("two"))]),
            row(&[("Incident ID", CellValue::text("1")), ("Units", CellValue::text("x"))]),
        ];

        let errors = validate_data(&rows, &fields, &ValidationContext::new());

        let order: Vec<(usize, &str)> =
            errors.iter().map(|e| (e.row_index, e.field.as_str())).collect();
        assert_eq!(order, vec![(0, "Incident ID"), (0, "Units"), (1, "Units")]);
    }
}
