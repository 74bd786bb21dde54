//! Validation of a whole batch of question rows.
//!
//! A batch loads only if every row is valid; otherwise every failing row is
//! reported with its reasons.

use std::fmt;

use quiz_core::model::{QuestionDraft, QuestionError, Row, ValidatedQuestion};
use thiserror::Error;
use tracing::{error, info};

use crate::tabular::{TabularError, read_rows};

/// Why one data row (1-based, header excluded) was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIssue {
    pub row: usize,
    pub error: QuestionError,
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}", self.row, self.error)
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImportError {
    #[error(transparent)]
    Malformed(#[from] TabularError),

    #[error("the file contains no questions")]
    Empty,

    #[error("{}", describe_issues(.issues))]
    Invalid { issues: Vec<RowIssue> },
}

fn describe_issues(issues: &[RowIssue]) -> String {
    let details: Vec<String> = issues.iter().map(ToString::to_string).collect();
    format!(
        "{} row(s) failed validation: {}",
        issues.len(),
        details.join(" | ")
    )
}

/// Validates every row.
///
/// # Errors
///
/// Returns `ImportError::Empty` for an empty batch and `ImportError::Invalid`
/// listing each failing row.
pub fn import_rows(rows: Vec<Row>) -> Result<Vec<ValidatedQuestion>, ImportError> {
    if rows.is_empty() {
        error!("question batch is empty");
        return Err(ImportError::Empty);
    }

    let mut questions = Vec::with_capacity(rows.len());
    let mut issues = Vec::new();
    for (i, row) in rows.into_iter().enumerate() {
        match QuestionDraft::from_row(row).validate() {
            Ok(question) => questions.push(question),
            Err(error) => issues.push(RowIssue { row: i + 1, error }),
        }
    }

    if !issues.is_empty() {
        for issue in &issues {
            error!(row = issue.row, "invalid question row: {}", issue.error);
        }
        return Err(ImportError::Invalid { issues });
    }

    info!(questions = questions.len(), "question rows validated");
    Ok(questions)
}

/// Parses CSV text and validates every row.
///
/// # Errors
///
/// Returns `ImportError::Malformed` if the text is not CSV, otherwise as [`import_rows`].
pub fn import_csv(text: &str) -> Result<Vec<ValidatedQuestion>, ImportError> {
    import_rows(read_rows(text)?)
}
