use quiz_core::QuestionBank;
use quiz_core::model::{Row, columns};
use thiserror::Error;
use tracing::info;

use crate::tabular::{TabularError, write_rows};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    #[error("there is no quiz data to export")]
    Empty,

    #[error(transparent)]
    Tabular(#[from] TabularError),
}

/// Source rows with authoritative `timesAsked` / `correctCount`, in load order.
///
/// Existing counter columns are overwritten in place; missing ones are appended.
///
/// # Errors
///
/// Returns `ExportError::Empty` if the bank has no questions.
pub fn export_rows(bank: &QuestionBank) -> Result<Vec<Row>, ExportError> {
    if bank.is_empty() {
        return Err(ExportError::Empty);
    }

    Ok(bank
        .iter()
        .map(|entry| {
            let stat = entry.stat();
            let mut row = entry.record().source().clone();
            row.set(columns::TIMES_ASKED, stat.times_asked().to_string());
            row.set(columns::CORRECT_COUNT, stat.correct_count().to_string());
            row
        })
        .collect())
}

/// [`export_rows`] serialized as CSV with every field quoted.
///
/// # Errors
///
/// Returns `ExportError::Empty` for an empty bank or `ExportError::Tabular` if writing fails.
pub fn export_csv(bank: &QuestionBank) -> Result<String, ExportError> {
    let rows = export_rows(bank)?;
    let text = write_rows(&rows)?;
    info!(rows = rows.len(), "exported question statistics");
    Ok(text)
}
