//! Delimited plain-text reading with delimiter sniffing.

use fireems_model::{CellValue, Record};

use crate::encoding::ensure_not_blank;
use crate::error::{ParseError, Result};

/// Candidate delimiters, in tie-break order.
const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b'\t', b'|', b';'];

/// Lines inspected when sniffing.
const SNIFF_LINES: usize = 10;

/// Column names used when no delimiter qualifies.
pub const LINE_NUMBER_COLUMN: &str = "LineNumber";
pub const LINE_TEXT_COLUMN: &str = "Text";

/// Pick the delimiter that splits the first lines most consistently.
///
/// A delimiter qualifies when every sampled line's field count is within one
/// of the first line's count and the average count is at least two. The
/// qualifying delimiter with the highest average wins; ties keep the earlier
/// candidate.
pub fn sniff_delimiter(text: &str) -> Option<u8> {
    let lines: Vec<&str> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(SNIFF_LINES)
        .collect();
    if lines.is_empty() {
        return None;
    }

    let mut best: Option<(u8, f64)> = None;
    for delimiter in CANDIDATE_DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| line.bytes().filter(|b| *b == delimiter).count() + 1)
            .collect();
        let first = counts[0];
        if counts.iter().any(|count| count.abs_diff(first) > 1) {
            continue;
        }
        let average = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
        if average < 2.0 {
            continue;
        }
        if best.is_none_or(|(_, best_average)| average > best_average) {
            best = Some((delimiter, average));
        }
    }
    best.map(|(delimiter, _)| delimiter)
}

/// Read delimited text, falling back to one row per line.
pub(crate) fn read_text(text: &str) -> Result<(Vec<String>, Vec<Record>)> {
    ensure_not_blank(text)?;
    match sniff_delimiter(text) {
        Some(delimiter) => {
            tracing::debug!(delimiter = %char::from(delimiter).escape_default(), "Sniffed delimiter");
            read_delimited(text, delimiter)
        }
        None => {
            tracing::debug!("No consistent delimiter; reading one row per line");
            Ok(read_lines(text))
        }
    }
}

fn read_delimited(text: &str, delimiter: u8) -> Result<(Vec<String>, Vec<Record>)> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.trim_start().as_bytes());

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| ParseError::Text {
            message: e.to_string(),
        })?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| ParseError::Text {
            message: e.to_string(),
        })?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        // Short lines leave trailing columns absent.
        let row: Record = columns
            .iter()
            .zip(record.iter())
            .map(|(name, field)| (name.clone(), CellValue::infer(field)))
            .collect();
        rows.push(row);
    }
    Ok((columns, rows))
}

fn read_lines(text: &str) -> (Vec<String>, Vec<Record>) {
    let rows = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            let mut row = Record::new();
            row.insert(
                LINE_NUMBER_COLUMN.to_string(),
                CellValue::Number((idx + 1) as f64),
            );
            row.insert(LINE_TEXT_COLUMN.to_string(), CellValue::text(line.trim()));
            row
        })
        .collect();
    (
        vec![LINE_NUMBER_COLUMN.to_string(), LINE_TEXT_COLUMN.to_string()],
        rows,
    )
}
