//! Entry points: dispatch a file or byte buffer to the matching reader.

use std::path::Path;

use fireems_model::{CellValue, Record};

use crate::csv::read_csv;
use crate::encoding::decode_text;
use crate::error::{ParseError, Result};
use crate::excel::read_workbook;
use crate::json::read_json;
use crate::text::read_text;
use crate::types::{FileType, ParseOptions, ParsedFile};
use crate::xml::read_xml;

/// Maximum accepted upload size (200 MB).
pub const MAX_FILE_SIZE: u64 = 200 * 1024 * 1024;

/// Column of the informational dataset returned for PDF uploads.
pub const PDF_MESSAGE_COLUMN: &str = "Message";

const PDF_MESSAGE: &str = "PDF files cannot be parsed for field mapping. \
    Export the CAD report as CSV, Excel, JSON or XML and upload that file instead.";

/// Parse a file, detecting its type from the extension.
pub fn parse_file(path: &Path, options: &ParseOptions) -> Result<ParsedFile> {
    let file_type = FileType::from_path(path)?;
    parse_file_as(path, file_type, options)
}

/// Parse a file as the given type.
pub fn parse_file_as(path: &Path, file_type: FileType, options: &ParseOptions) -> Result<ParsedFile> {
    check_file_size(path)?;
    let bytes = std::fs::read(path).map_err(|e| read_error(path, e))?;
    tracing::info!(
        path = %path.display(),
        file_type = %file_type,
        bytes = bytes.len(),
        "Parsing file"
    );
    parse_bytes(&bytes, file_type, options)
}

/// Parse an in-memory upload.
///
/// PDF input is not an error: it yields a one-column dataset explaining how
/// to export the data instead, so callers can show the guidance as-is.
pub fn parse_bytes(bytes: &[u8], file_type: FileType, options: &ParseOptions) -> Result<ParsedFile> {
    let (columns, rows) = match file_type {
        FileType::Pdf => {
            tracing::warn!("PDF upload is not supported; returning guidance row");
            let row = Record::from([(
                PDF_MESSAGE_COLUMN.to_string(),
                CellValue::text(PDF_MESSAGE),
            )]);
            (vec![PDF_MESSAGE_COLUMN.to_string()], vec![row])
        }
        FileType::Excel => read_workbook(bytes)?,
        FileType::Csv => read_csv(&decode_text(bytes)?)?,
        FileType::Txt => read_text(&decode_text(bytes)?)?,
        FileType::Json => read_json(&decode_text(bytes)?)?,
        FileType::Xml => read_xml(&decode_text(bytes)?)?,
    };

    let parsed = ParsedFile::new(file_type, columns, rows, options);
    tracing::debug!(
        file_type = %file_type,
        columns = parsed.columns.len(),
        total_rows = parsed.total_rows,
        truncated = parsed.truncated,
        "Parsed file"
    );
    Ok(parsed)
}

fn check_file_size(path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| read_error(path, e))?;
    if metadata.len() > MAX_FILE_SIZE {
        return Err(ParseError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size: MAX_FILE_SIZE,
        });
    }
    Ok(())
}

fn read_error(path: &Path, e: std::io::Error) -> ParseError {
    if e.kind() == std::io::ErrorKind::NotFound {
        ParseError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        ParseError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_returns_guidance_row() {
        let parsed = parse_bytes(b"%PDF-1.7", FileType::Pdf, &ParseOptions::default()).unwrap();
        assert_eq!(parsed.columns, vec![PDF_MESSAGE_COLUMN]);
        assert_eq!(parsed.data.len(), 1);
        assert!(parsed.data[0][PDF_MESSAGE_COLUMN]
            .to_string()
            .contains("cannot be parsed"));
    }

    #[test]
    fn test_missing_file() {
        let result = parse_file(Path::new("/nonexistent/calls.csv"), &ParseOptions::default());
        assert!(matches!(result, Err(ParseError::FileNotFound { .. })));
    }
}
