//! CSV text <-> `Row` conversion.

use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use quiz_core::model::Row;
use thiserror::Error;
use tracing::{debug, warn};

const BOM: char = '\u{feff}';

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TabularError {
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write CSV: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV output is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Parses CSV text whose first line names the columns.
///
/// A leading UTF-8 BOM is dropped and blank lines are skipped. Rows with a
/// different field count than the header are an error.
///
/// A column name that appears twice in the header yields a single column
/// holding the rightmost value; it is written back once on export.
///
/// # Errors
///
/// Returns `TabularError::Csv` when the text is not well-formed CSV.
pub fn read_rows(text: &str) -> Result<Vec<Row>, TabularError> {
    let text = match text.strip_prefix(BOM) {
        Some(rest) => {
            debug!("stripped UTF-8 BOM from input");
            rest
        }
        None => text,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());
    let headers = reader.headers()?.clone();
    let duplicates = duplicate_columns(&headers);
    if !duplicates.is_empty() {
        warn!(?duplicates, "repeated header columns are merged");
    }

    let mut rows: Vec<Row> = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(headers.iter().zip(record.iter()).collect());
    }
    debug!(rows = rows.len(), columns = headers.len(), "parsed CSV");
    Ok(rows)
}

/// Serializes rows as CSV with every field quoted and CRLF line endings.
///
/// The header is the union of all columns in first-seen order; a row missing
/// a column gets an empty field.
///
/// # Errors
///
/// Returns `TabularError` if the CSV writer fails.
pub fn write_rows(rows: &[Row]) -> Result<String, TabularError> {
    if rows.is_empty() {
        return Ok(String::new());
    }

    let header = header_union(rows);
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(header.iter())?;
    for row in rows {
        writer.write_record(header.iter().map(|column| row.get(column).unwrap_or_default()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

fn duplicate_columns(headers: &csv::StringRecord) -> Vec<&str> {
    let mut duplicates = Vec::new();
    for (i, column) in headers.iter().enumerate() {
        let repeated = headers.iter().take(i).any(|earlier| earlier == column);
        if repeated && !duplicates.contains(&column) {
            duplicates.push(column);
        }
    }
    duplicates
}

fn header_union(rows: &[Row]) -> Vec<&str> {
    let mut header: Vec<&str> = Vec::new();
    for column in rows.iter().flat_map(Row::columns) {
        if !header.contains(&column) {
            header.push(column);
        }
    }
    header
}
