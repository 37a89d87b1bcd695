//! Per-value transformation failures.
//!
//! These never leave the engine as errors: each one degrades the affected
//! value to its pre-step state and is recorded as a [`Diagnostic`](crate::Diagnostic).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("missing parameter '{param}'")]
    MissingParam { param: &'static str },

    #[error("invalid regex '{pattern}': {message}")]
    InvalidRegex { pattern: String, message: String },

    #[error("pattern '{pattern}' did not match")]
    NoMatch { pattern: String },

    #[error("'{value}' is not a number")]
    NotANumber { value: String },

    #[error("'{value}' is not a recognisable date")]
    UnparseableDate { value: String },

    #[error("unknown {what} '{name}'")]
    UnknownOption { what: &'static str, name: String },

    #[error("{kind} cannot be applied to a {found} value")]
    UnsupportedInput { kind: &'static str, found: &'static str },

    #[error("unknown transformation type '{0}'")]
    UnknownKind(String),
}

pub type Result<T> = std::result::Result<T, TransformError>;
