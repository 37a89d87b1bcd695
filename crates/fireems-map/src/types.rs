//! Options and result types for the mapping service.

use serde::Serialize;

use crate::error::{MappingError, MappingWarning};

/// Similarity at or below which a mapping is flagged as low confidence.
pub const LOW_CONFIDENCE_THRESHOLD: f64 = 50.0;

/// Rows scanned per column by type detection.
pub const DETECTION_SAMPLE_SIZE: usize = 100;

/// Thresholds for suggestion and checking.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingOptions {
    /// Suggestions scoring below this (0-100) are dropped.
    pub min_confidence: f64,
    /// Mappings scoring at or below this (0-100) get a warning.
    pub low_confidence_threshold: f64,
}

impl Default for MappingOptions {
    fn default() -> Self {
        Self {
            min_confidence: 0.0,
            low_confidence_threshold: LOW_CONFIDENCE_THRESHOLD,
        }
    }
}

impl MappingOptions {
    #[must_use]
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    #[must_use]
    pub fn with_low_confidence_threshold(mut self, threshold: f64) -> Self {
        self.low_confidence_threshold = threshold;
        self
    }
}

/// Outcome of [`validate_field_mapping`](crate::validate_field_mapping).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingValidation {
    pub is_valid: bool,
    pub errors: Vec<MappingError>,
    pub warnings: Vec<MappingWarning>,
}

impl MappingValidation {
    pub fn has_duplicates(&self) -> bool {
        self.errors.iter().any(MappingError::is_duplicate)
    }
}

/// Column type guessed from sample values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectedType {
    String,
    Number,
    Boolean,
    Datetime,
}

impl DetectedType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectedType::String => "string",
            DetectedType::Number => "number",
            DetectedType::Boolean => "boolean",
            DetectedType::Datetime => "datetime",
        }
    }
}

impl std::fmt::Display for DetectedType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
