//! Validation engine.
//!
//! Checks transformed rows against a destination tool's [`TargetField`]s
//! and produces a flat, row-major list of
//! [`ValidationError`](fireems_model::ValidationError)s. Defaults declared by
//! `__default__` mappings travel in an explicit [`ValidationContext`] built
//! for each pass, so a field with a default is never reported as missing.
//!
//! [`TargetField`]: fireems_model::TargetField

mod checks;
mod context;
mod custom;
mod engine;
mod rules;
mod summary;

pub use checks::{check_type, parse_location};
pub use context::ValidationContext;
pub use custom::{CustomCheck, Latitude, Longitude, NotFutureDate};
pub use engine::{ValidatedData, transform_and_validate, validate_data, validate_with_mappings};
pub use summary::ValidationSummary;
