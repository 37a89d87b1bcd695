//! Parser input and output types.

use std::fmt;
use std::path::Path;

use fireems_model::Record;
use serde::Serialize;

use crate::error::{ParseError, Result};

/// Default preview cap on returned rows.
pub const DEFAULT_SAMPLE_LIMIT: usize = 100;

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Csv,
    /// `xlsx`, `xls`, `xlsm`, `xlsb` and `ods` workbooks.
    Excel,
    Json,
    Xml,
    Txt,
    /// Accepted but not parsed; see [`crate::parse_bytes`].
    Pdf,
}

impl FileType {
    /// Map a file extension (without the dot, any case) to a file type.
    pub fn from_extension(extension: &str) -> Result<Self> {
        match extension.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Ok(Self::Excel),
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            "txt" | "tsv" | "tab" | "dat" => Ok(Self::Txt),
            "pdf" => Ok(Self::Pdf),
            other => Err(ParseError::UnsupportedFormat {
                extension: other.to_string(),
            }),
        }
    }

    /// Detect the file type from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        Self::from_extension(extension)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Excel => "excel",
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Txt => "txt",
            Self::Pdf => "pdf",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parser configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of rows returned in [`ParsedFile::data`].
    ///
    /// This is a preview cap for the mapping UI. `None` returns every row,
    /// which is what a production export needs.
    pub sample_limit: Option<usize>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            sample_limit: Some(DEFAULT_SAMPLE_LIMIT),
        }
    }
}

impl ParseOptions {
    /// Options that return every row.
    pub fn unlimited() -> Self {
        Self { sample_limit: None }
    }

    #[must_use]
    pub fn with_sample_limit(mut self, limit: Option<usize>) -> Self {
        self.sample_limit = limit;
        self
    }
}

/// Parsed file contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedFile {
    /// Column names in source order.
    pub columns: Vec<String>,
    /// Rows, capped by [`ParseOptions::sample_limit`].
    pub data: Vec<Record>,
    /// Number of data rows in the file before the cap was applied.
    pub total_rows: usize,
    /// True when `data` holds fewer rows than the file.
    pub truncated: bool,
    pub file_type: FileType,
}

impl ParsedFile {
    /// Build a result, applying the sample cap.
    pub(crate) fn new(
        file_type: FileType,
        columns: Vec<String>,
        mut data: Vec<Record>,
        options: &ParseOptions,
    ) -> Self {
        let total_rows = data.len();
        if let Some(limit) = options.sample_limit {
            data.truncate(limit);
        }
        let truncated = data.len() < total_rows;
        if truncated {
            tracing::debug!(
                file_type = %file_type,
                total_rows,
                returned = data.len(),
                "Preview truncated to sample limit"
            );
        }
        Self {
            columns,
            data,
            total_rows,
            truncated,
            file_type,
        }
    }

    pub fn row_count(&self) -> usize {
        self.data.len()
    }
}
