use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::QuestionId;

/// Record of a single answer given during a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerLog {
    pub question_id: QuestionId,
    pub is_correct: bool,
    pub answered_at: DateTime<Utc>,
}

impl AnswerLog {
    #[must_use]
    pub fn new(question_id: QuestionId, is_correct: bool, answered_at: DateTime<Utc>) -> Self {
        Self {
            question_id,
            is_correct,
            answered_at,
        }
    }
}
