//! CAD export ingestion.
//!
//! Turns an uploaded file into `{columns, data}`: column names in source order
//! and one typed [`Record`](fireems_model::Record) per data row.
//!
//! # Formats
//!
//! - **CSV**: read with polars; cells typed with `CellValue::infer`
//! - **Excel**: first sheet only via calamine; empty cells are absent keys
//! - **JSON**: top-level array, first array-valued property, or single object
//! - **XML**: row element detected as the most repeated sibling tag
//! - **TXT**: delimiter sniffed from `, \t | ;`, else one row per line
//! - **PDF**: not parsed; returns a one-row guidance dataset
//!
//! Returned rows are capped by [`ParseOptions::sample_limit`] (100 by
//! default). [`ParsedFile::total_rows`] and [`ParsedFile::truncated`] report
//! what the cap removed; pass [`ParseOptions::unlimited`] for full exports.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use fireems_ingest::{ParseOptions, parse_file};
//!
//! let parsed = parse_file(Path::new("calls.csv"), &ParseOptions::default())?;
//! println!("{} columns, {} rows", parsed.columns.len(), parsed.total_rows);
//! ```

mod csv;
mod encoding;
mod error;
mod excel;
mod json;
mod reader;
mod text;
mod types;
mod xml;

// === Error Types ===
pub use error::{ParseError, Result};

// === Entry Points ===
pub use reader::{MAX_FILE_SIZE, PDF_MESSAGE_COLUMN, parse_bytes, parse_file, parse_file_as};

// === Types ===
pub use types::{DEFAULT_SAMPLE_LIMIT, FileType, ParseOptions, ParsedFile};

// === Helpers ===
pub use encoding::decode_text;
pub use text::{LINE_NUMBER_COLUMN, LINE_TEXT_COLUMN, sniff_delimiter};
