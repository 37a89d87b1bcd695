//! Mapping coverage and data quality report.

use fireems_model::{FieldMapping, Record, TargetField};
use fireems_transform::transform_data_with_mapping;
use serde::Serialize;

const REQUIRED_WEIGHT: f64 = 60.0;
const OPTIONAL_WEIGHT: f64 = 20.0;
const FILL_WEIGHT: f64 = 20.0;

/// Fill ratio below which a mapped required field gets a recommendation.
const SPARSE_FILL_RATIO: f64 = 0.5;

/// Coverage of one target field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldCoverage {
    pub target_field: String,
    pub is_required: bool,
    /// Source of the first mapping writing this field, if any.
    pub source_field: Option<String>,
    /// Share of sample rows with a non-empty transformed value (0 if unmapped).
    pub fill_ratio: f64,
}

/// Summary of how well a mapping set covers a destination schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMappingReport {
    pub total_fields: usize,
    pub mapped_fields: usize,
    pub unmapped_fields: usize,
    pub required_fields: usize,
    pub required_fields_mapped: usize,
    /// 0-100.
    pub data_quality_score: u8,
    pub coverage: Vec<FieldCoverage>,
    pub recommendations: Vec<String>,
}

impl FieldMappingReport {
    pub fn unmapped_required(&self) -> impl Iterator<Item = &FieldCoverage> {
        self.coverage
            .iter()
            .filter(|entry| entry.is_required && entry.source_field.is_none())
    }
}

/// Build a coverage report for `mappings` over `target_fields`.
///
/// The quality score weights required coverage at 60, optional coverage at
/// 20 and the average fill ratio across all target fields at 20. Mapping one
/// more required field never lowers it.
pub fn generate_field_mapping_report(
    mappings: &[FieldMapping],
    target_fields: &[TargetField],
    sample_rows: &[Record],
) -> FieldMappingReport {
    let transformed = transform_data_with_mapping(sample_rows, mappings);

    let coverage: Vec<FieldCoverage> = target_fields
        .iter()
        .map(|field| {
            let source = mappings
                .iter()
                .find(|mapping| mapping.target_field == field.name)
                .map(|mapping| mapping.source_field.clone());
            let fill_ratio = match source {
                None => 0.0,
                Some(_) if transformed.is_empty() => 1.0,
                Some(_) => {
                    let filled = transformed
                        .iter()
                        .filter(|row| row.get(&field.name).is_some_and(|value| !value.is_empty()))
                        .count();
                    filled as f64 / transformed.len() as f64
                }
            };
            FieldCoverage {
                target_field: field.name.clone(),
                is_required: field.is_required,
                source_field: source,
                fill_ratio,
            }
        })
        .collect();

    let total_fields = coverage.len();
    let mapped_fields = coverage
        .iter()
        .filter(|entry| entry.source_field.is_some())
        .count();
    let required_fields = coverage.iter().filter(|entry| entry.is_required).count();
    let required_fields_mapped = coverage
        .iter()
        .filter(|entry| entry.is_required && entry.source_field.is_some())
        .count();
    let optional_fields = total_fields - required_fields;
    let optional_fields_mapped = mapped_fields - required_fields_mapped;

    let average_fill = if total_fields == 0 {
        1.0
    } else {
        coverage.iter().map(|entry| entry.fill_ratio).sum::<f64>() / total_fields as f64
    };
    let score = REQUIRED_WEIGHT * ratio(required_fields_mapped, required_fields)
        + OPTIONAL_WEIGHT * ratio(optional_fields_mapped, optional_fields)
        + FILL_WEIGHT * average_fill;

    let recommendations = recommend(&coverage, optional_fields - optional_fields_mapped);

    tracing::debug!(
        total_fields,
        mapped_fields,
        required_fields_mapped,
        score,
        "Built field mapping report"
    );

    FieldMappingReport {
        total_fields,
        mapped_fields,
        unmapped_fields: total_fields - mapped_fields,
        required_fields,
        required_fields_mapped,
        data_quality_score: score.round().clamp(0.0, 100.0) as u8,
        coverage,
        recommendations,
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        1.0
    } else {
        part as f64 / whole as f64
    }
}

fn recommend(coverage: &[FieldCoverage], unmapped_optional: usize) -> Vec<String> {
    let mut recommendations = Vec::new();
    for entry in coverage.iter().filter(|entry| entry.is_required) {
        match &entry.source_field {
            None => recommendations.push(format!(
                "Map a source column to required field '{}' or give it a default value",
                entry.target_field
            )),
            Some(source) if entry.fill_ratio < SPARSE_FILL_RATIO => {
                recommendations.push(format!(
                    "Required field '{}' is empty in {:.0}% of sample rows; check source column '{}' or add a default value",
                    entry.target_field,
                    (1.0 - entry.fill_ratio) * 100.0,
                    source
                ));
            }
            Some(_) => {}
        }
    }
    if unmapped_optional > 0 {
        recommendations.push(format!(
            "{unmapped_optional} optional field(s) are unmapped; mapping them enables more analysis"
        ));
    }
    recommendations
}
