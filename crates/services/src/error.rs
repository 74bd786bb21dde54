//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{QuestionId, SessionSummaryError};
use quiz_core::{SelectError, StoreError};
use storage::{ExportError, ImportError};

/// Errors emitted by quiz sessions and the controller.
///
/// Every message is meant to be shown to the learner as-is.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no quiz is loaded; choose a question file first")]
    NotLoaded,
    #[error("could not load the quiz: {0}")]
    Load(#[from] ImportError),
    #[error("no question could be selected: {0}")]
    Select(#[from] SelectError),
    #[error("this question has already been answered")]
    AlreadyAnswered,
    #[error("answer the current question before moving on")]
    NotAnswered,
    #[error("the answer is for question {answered}, but question {current} is on screen")]
    StaleAnswer {
        answered: QuestionId,
        current: QuestionId,
    },
    #[error("option {index} does not exist; the question has {available} options")]
    UnknownOption { index: usize, available: usize },
    #[error("there is no quiz data to export; play a quiz first")]
    NothingToExport,
    #[error("could not export results: {0}")]
    Export(#[from] ExportError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Summary(#[from] SessionSummaryError),
}
