//! Error types for CAD file ingestion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while parsing an uploaded file.
///
/// Recoverable inputs (PDF uploads) never produce an error; they yield an
/// informational dataset instead.
#[derive(Debug, Error)]
pub enum ParseError {
    // === File System Errors ===
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the configured size limit.
    #[error("file {path} is too large ({size} bytes, max {max_size} bytes)")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    // === Format Errors ===
    /// Extension does not map to a supported format.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    /// Unsupported text encoding.
    #[error("unsupported encoding {encoding}; re-save the file as UTF-8")]
    UnsupportedEncoding { encoding: &'static str },

    /// File has no content.
    #[error("file is empty")]
    EmptyFile,

    // === Per-format Errors ===
    #[error("failed to parse CSV: {message}")]
    Csv { message: String },

    #[error("failed to parse delimited text: {message}")]
    Text { message: String },

    #[error("failed to parse JSON: {message}")]
    Json { message: String },

    #[error("failed to parse XML: {message}")]
    Xml { message: String },

    #[error("failed to read workbook: {message}")]
    Excel { message: String },

    /// Workbook has no sheets, or its first sheet has no header row.
    #[error("workbook is empty: {reason}")]
    EmptyWorkbook { reason: String },
}

impl From<polars::prelude::PolarsError> for ParseError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::Csv {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            message: err.to_string(),
        }
    }
}

impl From<calamine::Error> for ParseError {
    fn from(err: calamine::Error) -> Self {
        Self::Excel {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParseError::FileNotFound {
            path: PathBuf::from("/path/to/calls.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /path/to/calls.csv");

        let err = ParseError::UnsupportedFormat {
            extension: "docx".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported file format: docx");
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("test".into());
        let err: ParseError = polars_err.into();
        assert!(matches!(err, ParseError::Csv { .. }));
    }
}
