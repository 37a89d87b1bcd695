//! Field-mapping service.
//!
//! Matches source columns from a CAD export against a destination tool's
//! fixed schema:
//!
//! - **score**: name normalization, 0-100 similarity, per-source suggestions
//!   and the one-to-one [`ScoringEngine`]
//! - **check**: mapping completeness (unknown, duplicate and unmapped
//!   required targets) plus low-confidence warnings
//! - **detect**: column type detection from sample rows
//! - **report**: coverage and data quality score
//!
//! Applying a mapping to rows lives in `fireems-transform` and is re-exported
//! here as [`transform_data_with_mapping`].

mod check;
mod detect;
mod error;
mod report;
mod score;
mod types;

pub use check::{validate_field_mapping, validate_field_mapping_with};
pub use detect::{detect_field_types, detect_field_types_sampled};
pub use error::{MappingError, MappingWarning};
pub use fireems_transform::transform_data_with_mapping;
pub use report::{FieldCoverage, FieldMappingReport, generate_field_mapping_report};
pub use score::{
    FieldSuggestion, ScoringEngine, calculate_field_similarity, normalize_field_name,
    score_target, suggest_field_mapping,
};
pub use types::{
    DETECTION_SAMPLE_SIZE, DetectedType, LOW_CONFIDENCE_THRESHOLD, MappingOptions,
    MappingValidation,
};
