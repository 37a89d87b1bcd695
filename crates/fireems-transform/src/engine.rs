//! Row-level mapping execution.

use fireems_model::{CellValue, DefaultValueRegistry, FieldMapping, FieldTransformation, Record};

use crate::context::{Diagnostic, TransformResult};
use crate::error::TransformError;
use crate::ops::{RegexCache, apply_transformation};

/// Apply mappings to every row and return the transformed rows.
///
/// Input rows are never modified. Values that fail a step keep their pre-step
/// value; use [`transform_with_diagnostics`] to see which ones did.
pub fn transform_data_with_mapping(rows: &[Record], mappings: &[FieldMapping]) -> Vec<Record> {
    let defaults = DefaultValueRegistry::from_mappings(mappings);
    transform_with_diagnostics(rows, mappings, &defaults).rows
}

/// Apply mappings to every row, collecting a diagnostic for each degraded value.
///
/// When a mapped value comes out empty and `defaults` holds a value for the
/// target field, the registered default is used.
pub fn transform_with_diagnostics(
    rows: &[Record],
    mappings: &[FieldMapping],
    defaults: &DefaultValueRegistry,
) -> TransformResult {
    let mut regexes = RegexCache::new();
    let mut result = TransformResult::default();

    for (row_index, row) in rows.iter().enumerate() {
        let mut out = Record::new();
        for mapping in mappings {
            let seed = source_value(row, mapping);
            let (mut value, failures) =
                run_pipeline(seed, &mapping.transformations, &mut regexes);

            for failure in failures {
                let diagnostic = degraded_diagnostic(&failure.error)
                    .with_row(row_index)
                    .with_field(&mapping.target_field)
                    .with_transformation(failure.kind)
                    .with_original_value(failure.kept.to_string());
                tracing::debug!(
                    row = row_index,
                    field = %mapping.target_field,
                    error = %failure.error,
                    "Transformation fell back to original value"
                );
                result.add_diagnostic(diagnostic);
            }

            if value.is_empty() {
                if let Some(default) = defaults.get_default_value(&mapping.target_field) {
                    value = default.clone();
                }
            }
            out.insert(mapping.target_field.clone(), value);
        }
        result.rows.push(out);
    }

    tracing::debug!(
        rows = result.rows_processed(),
        mappings = mappings.len(),
        diagnostics = result.diagnostics.len(),
        "Transformed dataset"
    );
    result
}

/// A step that failed and left its input in place.
#[derive(Debug, Clone, PartialEq)]
pub struct StepFailure {
    /// Transformation type of the failed step.
    pub kind: String,
    /// Value kept in place of the step's result.
    pub kept: CellValue,
    pub error: TransformError,
}

/// Run a transformation list over one value.
///
/// Returns the final value and every step that failed along the way.
pub fn apply_transformations(
    value: CellValue,
    transformations: &[FieldTransformation],
) -> (CellValue, Vec<StepFailure>) {
    run_pipeline(value, transformations, &mut RegexCache::new())
}

fn source_value(row: &Record, mapping: &FieldMapping) -> CellValue {
    if mapping.is_default_source() {
        return mapping.declared_default().unwrap_or_default();
    }
    row.get(&mapping.source_field).cloned().unwrap_or_default()
}

fn run_pipeline(
    seed: CellValue,
    transformations: &[FieldTransformation],
    regexes: &mut RegexCache,
) -> (CellValue, Vec<StepFailure>) {
    let mut value = seed;
    let mut failures = Vec::new();
    for transformation in transformations {
        match apply_transformation(&value, transformation, regexes) {
            Ok(next) => value = next,
            Err(error) => failures.push(StepFailure {
                kind: transformation.kind.to_string(),
                kept: value.clone(),
                error,
            }),
        }
    }
    (value, failures)
}

fn degraded_diagnostic(error: &TransformError) -> Diagnostic {
    match error {
        TransformError::UnknownKind(_) => Diagnostic::info(error.to_string()),
        _ => Diagnostic::warning(error.to_string()),
    }
}
