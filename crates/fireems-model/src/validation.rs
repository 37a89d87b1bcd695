//! Row/field validation errors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationErrorKind {
    Required,
    Min,
    Max,
    Pattern,
    OneOf,
    /// Type mismatches and named custom checks.
    Custom,
}

impl ValidationErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Min => "min",
            Self::Max => "max",
            Self::Pattern => "pattern",
            Self::OneOf => "oneOf",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One offending (row, field) pair.
///
/// This is a data record handed to the UI/export layer, not a Rust error:
/// validation failures never abort a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub row_index: usize,
    pub field: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    pub fn new(
        row_index: usize,
        field: impl Into<String>,
        kind: ValidationErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            row_index,
            field: field.into(),
            message: message.into(),
            kind,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {} [{}] {}: {}",
            self.row_index, self.kind, self.field, self.message
        )
    }
}
