//! Text decoding for the text-based formats.

use std::borrow::Cow;

use crate::error::{ParseError, Result};

/// Decode raw file bytes as text.
///
/// UTF-16 byte order marks are rejected. A UTF-8 BOM is stripped. Bytes that
/// are not valid UTF-8 are decoded as Windows-1252, the usual encoding of
/// legacy CAD exports.
pub fn decode_text(bytes: &[u8]) -> Result<Cow<'_, str>> {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(ParseError::UnsupportedEncoding {
            encoding: "UTF-16 LE",
        });
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(ParseError::UnsupportedEncoding {
            encoding: "UTF-16 BE",
        });
    }

    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(Cow::Borrowed(text)),
        Err(_) => {
            let (text, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            tracing::warn!("Input is not valid UTF-8; decoded as Windows-1252");
            Ok(text)
        }
    }
}

/// Return an error when the text holds nothing but whitespace.
pub(crate) fn ensure_not_blank(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        Err(ParseError::EmptyFile)
    } else {
        Ok(())
    }
}
