use chrono::{DateTime, Utc};
use std::collections::HashSet;
use thiserror::Error;

use crate::model::{AnswerLog, QuestionId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionSummaryError {
    #[error("an answer was logged before the session started")]
    InvalidTimeRange,

    #[error("too many answers for a single session")]
    TooManyAnswers,
}

/// Aggregate summary of one quiz session, kept up to date one answer at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    started_at: DateTime<Utc>,
    last_answer_at: Option<DateTime<Utc>>,
    answered: u32,
    correct: u32,
    seen: HashSet<QuestionId>,
}

impl SessionSummary {
    /// An empty summary for a session started at `started_at`.
    #[must_use]
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            last_answer_at: None,
            answered: 0,
            correct: 0,
            seen: HashSet::new(),
        }
    }

    /// Build a summary from the answers logged since `started_at`.
    ///
    /// # Errors
    ///
    /// As [`SessionSummary::record`], for the first offending log.
    pub fn from_logs(
        started_at: DateTime<Utc>,
        logs: &[AnswerLog],
    ) -> Result<Self, SessionSummaryError> {
        let mut summary = Self::new(started_at);
        for log in logs {
            summary.record(log)?;
        }
        Ok(summary)
    }

    /// Counts one more answer. The summary is unchanged on error.
    ///
    /// # Errors
    ///
    /// Returns `SessionSummaryError::InvalidTimeRange` if the answer predates the session.
    /// Returns `SessionSummaryError::TooManyAnswers` if the count cannot fit in `u32`.
    pub fn record(&mut self, log: &AnswerLog) -> Result<(), SessionSummaryError> {
        if log.answered_at < self.started_at {
            return Err(SessionSummaryError::InvalidTimeRange);
        }
        let answered = self
            .answered
            .checked_add(1)
            .ok_or(SessionSummaryError::TooManyAnswers)?;

        self.answered = answered;
        if log.is_correct {
            self.correct += 1;
        }
        self.seen.insert(log.question_id);
        self.last_answer_at = self.last_answer_at.max(Some(log.answered_at));
        Ok(())
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn last_answer_at(&self) -> Option<DateTime<Utc>> {
        self.last_answer_at
    }

    #[must_use]
    pub fn answered(&self) -> u32 {
        self.answered
    }

    /// Correct answers this session; equals the session score.
    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn distinct_questions(&self) -> usize {
        self.seen.len()
    }

    /// Share of answers that were correct, or `None` before the first answer.
    #[must_use]
    pub fn accuracy(&self) -> Option<f64> {
        (self.answered > 0).then(|| f64::from(self.correct) / f64::from(self.answered))
    }
}
