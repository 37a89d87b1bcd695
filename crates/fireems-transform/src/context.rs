//! Transformation results and diagnostics.

use fireems_model::Record;
use serde::Serialize;

/// Result of transforming a dataset.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransformResult {
    /// Transformed rows, one per input row.
    pub rows: Vec<Record>,

    /// Values that degraded to pass-through, and why.
    pub diagnostics: Vec<Diagnostic>,
}

impl TransformResult {
    /// Number of rows processed.
    pub fn rows_processed(&self) -> usize {
        self.rows.len()
    }

    /// Add a diagnostic.
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Count warnings.
    pub fn warning_count(&self) -> usize {
        self.count(DiagnosticLevel::Warning)
    }

    /// Count informational diagnostics.
    pub fn info_count(&self) -> usize {
        self.count(DiagnosticLevel::Info)
    }

    fn count(&self, level: DiagnosticLevel) -> usize {
        self.diagnostics.iter().filter(|d| d.level == level).count()
    }
}

/// A diagnostic message from transformation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// Severity level.
    pub level: DiagnosticLevel,

    /// Message text.
    pub message: String,

    /// Target field the value was headed for.
    pub field: Option<String>,

    /// Row index (if applicable).
    pub row: Option<usize>,

    /// Transformation type that failed.
    pub transformation: Option<String>,

    /// Value kept in place of the failed result.
    pub original_value: Option<String>,
}

impl Diagnostic {
    fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            field: None,
            row: None,
            transformation: None,
            original_value: None,
        }
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Warning, message)
    }

    /// Create an info diagnostic.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Info, message)
    }

    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    #[must_use]
    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    #[must_use]
    pub fn with_transformation(mut self, kind: impl Into<String>) -> Self {
        self.transformation = Some(kind.into());
        self
    }

    #[must_use]
    pub fn with_original_value(mut self, value: impl Into<String>) -> Self {
        self.original_value = Some(value.into());
        self
    }
}

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Warning,
    Info,
}
