//! FireEMS data model.
//!
//! Types shared by every stage of the CAD import pipeline:
//!
//! - **value**: `CellValue` and `Record`, the dynamic row representation
//! - **field**: target schema entries (`TargetField`) and their validation rules
//! - **mapping**: source-to-target mappings and the transformation DSL
//! - **defaults**: the per-pass default value registry
//! - **validation**: row/field validation errors
//! - **datetime**: lenient date/time parsing shared by transform and validate

pub mod datetime;
pub mod defaults;
pub mod error;
pub mod field;
pub mod mapping;
pub mod validation;
pub mod value;

pub use datetime::{is_datetime, parse_datetime};
pub use defaults::DefaultValueRegistry;
pub use error::{ModelError, Result};
pub use field::{FieldDataType, TargetField, ValidationRule};
pub use mapping::{
    DEFAULT_SOURCE_FIELD, FieldMapping, FieldTransformation, MappingProfile, TransformKind,
};
pub use validation::{ValidationError, ValidationErrorKind};
pub use value::{CellValue, Record, format_number};
