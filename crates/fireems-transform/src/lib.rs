//! Field transformation pipeline.
//!
//! Applies each [`FieldMapping`](fireems_model::FieldMapping)'s ordered
//! transformation list to produce export-ready rows:
//!
//! - **ops**: the `split`, `join`, `format`, `convert`, `extract` and `replace` steps
//! - **format**: date and number formatting, including custom date tokens
//! - **engine**: row-level execution, `__default__` seeding and default fill
//! - **context**: `TransformResult` and per-value `Diagnostic`s
//!
//! A single bad cell never aborts a dataset: a failing step leaves the value
//! as it was before that step and records a diagnostic.

pub mod context;
pub mod engine;
pub mod error;
pub mod format;
pub mod ops;

pub use context::{Diagnostic, DiagnosticLevel, TransformResult};
pub use engine::{
    StepFailure, apply_transformations, transform_data_with_mapping, transform_with_diagnostics,
};
pub use error::TransformError;
pub use format::{format_date, format_number, tokens_to_strftime};
pub use ops::{RegexCache, apply_transformation};
