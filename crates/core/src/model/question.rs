use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::row::Row;
use crate::model::stat::QuestionStat;

/// Upper bound on wrong options per question (`wrong_option1`..`wrong_option7`).
pub const MAX_WRONG_OPTIONS: usize = 7;

/// Column names of the question table.
pub mod columns {
    use super::MAX_WRONG_OPTIONS;

    pub const QUESTION: &str = "question";
    pub const CORRECT_ANSWER: &str = "correct_answer";
    pub const TIMES_ASKED: &str = "timesAsked";
    pub const CORRECT_COUNT: &str = "correctCount";

    /// Name of the `n`-th wrong option column (1-based).
    #[must_use]
    pub fn wrong_option(n: usize) -> String {
        format!("wrong_option{n}")
    }

    /// All wrong option column names in order.
    pub fn wrong_options() -> impl Iterator<Item = String> {
        (1..=MAX_WRONG_OPTIONS).map(wrong_option)
    }
}

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// A single reason a question row is unusable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionProblem {
    #[error("'question' is blank; enter the question text")]
    BlankQuestion,

    #[error("'correct_answer' is blank; enter the correct answer")]
    BlankCorrectAnswer,

    #[error("at least one of 'wrong_option1'..'wrong_option7' must be filled in")]
    NoWrongOptions,

    #[error("'{column}' value '{value}' is not a non-negative integer")]
    NotACount { column: &'static str, value: String },

    #[error("'correctCount' ({correct_count}) is greater than 'timesAsked' ({times_asked})")]
    CorrectExceedsAsked {
        times_asked: u32,
        correct_count: u32,
    },
}

/// Every problem found in one question row.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub struct QuestionError {
    problems: Vec<QuestionProblem>,
}

impl QuestionError {
    #[must_use]
    pub fn problems(&self) -> &[QuestionProblem] {
        &self.problems
    }
}

impl fmt::Display for QuestionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, problem) in self.problems.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{problem}")?;
        }
        Ok(())
    }
}

//
// ─── QUESTION RECORD ───────────────────────────────────────────────────────────
//

/// Static content of one question.
///
/// `source` keeps every column of the row the question came from, in its
/// original order, so an export can reproduce columns this crate does not use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    text: String,
    correct_answer: String,
    wrong_options: Vec<String>,
    source: Row,
}

impl QuestionRecord {
    /// Builds a record directly, without validation.
    ///
    /// Wrong options beyond `MAX_WRONG_OPTIONS` are dropped. The source row is
    /// synthesized from the given fields.
    pub fn new(
        text: impl Into<String>,
        correct_answer: impl Into<String>,
        wrong_options: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let text = text.into();
        let correct_answer = correct_answer.into();
        let wrong_options: Vec<String> = wrong_options
            .into_iter()
            .take(MAX_WRONG_OPTIONS)
            .map(Into::into)
            .collect();

        let mut source = Row::new();
        source.set(columns::QUESTION, text.as_str());
        source.set(columns::CORRECT_ANSWER, correct_answer.as_str());
        for (i, option) in wrong_options.iter().enumerate() {
            source.set(columns::wrong_option(i + 1), option.as_str());
        }

        Self {
            text,
            correct_answer,
            wrong_options,
            source,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    /// Wrong options in column order, blanks included.
    #[must_use]
    pub fn wrong_options(&self) -> &[String] {
        &self.wrong_options
    }

    #[must_use]
    pub fn source(&self) -> &Row {
        &self.source
    }
}

//
// ─── DRAFT + VALIDATION ────────────────────────────────────────────────────────
//

/// Unvalidated question as read from one input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub text: String,
    pub correct_answer: String,
    pub wrong_options: Vec<String>,
    pub times_asked: Option<String>,
    pub correct_count: Option<String>,
    pub source: Row,
}

impl QuestionDraft {
    /// Picks the known columns out of `row`. Missing text columns become empty.
    #[must_use]
    pub fn from_row(row: Row) -> Self {
        let text_of = |column: &str| row.get(column).unwrap_or_default().to_owned();
        let wrong_options = columns::wrong_options()
            .filter_map(|column| row.get(&column).map(str::to_owned))
            .collect();

        Self {
            text: text_of(columns::QUESTION),
            correct_answer: text_of(columns::CORRECT_ANSWER),
            wrong_options,
            times_asked: row.get(columns::TIMES_ASKED).map(str::to_owned),
            correct_count: row.get(columns::CORRECT_COUNT).map(str::to_owned),
            source: row,
        }
    }

    /// Validates the draft, collecting every problem rather than stopping at the first.
    ///
    /// Missing or blank counters count as zero.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` listing each `QuestionProblem` found.
    pub fn validate(self) -> Result<ValidatedQuestion, QuestionError> {
        let mut problems = Vec::new();

        if self.text.trim().is_empty() {
            problems.push(QuestionProblem::BlankQuestion);
        }
        if self.correct_answer.trim().is_empty() {
            problems.push(QuestionProblem::BlankCorrectAnswer);
        }
        if self.wrong_options.iter().all(|o| o.trim().is_empty()) {
            problems.push(QuestionProblem::NoWrongOptions);
        }

        let times_asked = parse_count(columns::TIMES_ASKED, self.times_asked.as_deref());
        let correct_count = parse_count(columns::CORRECT_COUNT, self.correct_count.as_deref());
        let stat = match (times_asked, correct_count) {
            (Ok(times_asked), Ok(correct_count)) => QuestionStat::new(times_asked, correct_count)
                .map_err(|_| QuestionProblem::CorrectExceedsAsked {
                    times_asked,
                    correct_count,
                }),
            (Err(e), Ok(_)) | (Ok(_), Err(e)) => Err(e),
            (Err(e1), Err(e2)) => {
                problems.push(e1);
                Err(e2)
            }
        };
        let stat = match stat {
            Ok(stat) => Some(stat),
            Err(problem) => {
                problems.push(problem);
                None
            }
        };

        match stat {
            Some(stat) if problems.is_empty() => Ok(ValidatedQuestion {
                record: QuestionRecord {
                    text: self.text,
                    correct_answer: self.correct_answer,
                    wrong_options: self.wrong_options,
                    source: self.source,
                },
                stat,
            }),
            _ => Err(QuestionError { problems }),
        }
    }
}

fn parse_count(column: &'static str, raw: Option<&str>) -> Result<u32, QuestionProblem> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(0);
    };
    raw.parse::<u32>().map_err(|_| QuestionProblem::NotACount {
        column,
        value: raw.to_owned(),
    })
}

/// A question that passed validation, with its seeded statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuestion {
    pub record: QuestionRecord,
    pub stat: QuestionStat,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs.iter().copied().collect()
    }

    #[test]
    fn valid_row_seeds_stat_and_keeps_source() {
        let source = row(&[
            ("question", "Capital of France?"),
            ("correct_answer", "Paris"),
            ("wrong_option1", "Lyon"),
            ("wrong_option2", ""),
            ("timesAsked", "4"),
            ("correctCount", " 3 "),
            ("topic", "geo"),
        ]);

        let validated = QuestionDraft::from_row(source.clone()).validate().unwrap();

        assert_eq!(validated.record.text(), "Capital of France?");
        assert_eq!(validated.record.correct_answer(), "Paris");
        assert_eq!(validated.record.wrong_options(), ["Lyon", ""]);
        assert_eq!(validated.record.source(), &source);
        assert_eq!(validated.stat, QuestionStat::new(4, 3).unwrap());
    }

    #[test]
    fn missing_counters_count_as_zero() {
        let validated = QuestionDraft::from_row(row(&[
            ("question", "Q"),
            ("correct_answer", "A"),
            ("wrong_option3", "B"),
            ("timesAsked", "  "),
        ]))
        .validate()
        .unwrap();

        assert_eq!(validated.stat, QuestionStat::default());
    }

    #[test]
    fn blank_fields_are_all_reported() {
        let err = QuestionDraft::from_row(row(&[
            ("question", "  "),
            ("wrong_option1", " "),
            ("timesAsked", "x"),
            ("correctCount", "-1"),
        ]))
        .validate()
        .unwrap_err();

        assert_eq!(
            err.problems(),
            [
                QuestionProblem::BlankQuestion,
                QuestionProblem::BlankCorrectAnswer,
                QuestionProblem::NoWrongOptions,
                QuestionProblem::NotACount {
                    column: "timesAsked",
                    value: "x".into()
                },
                QuestionProblem::NotACount {
                    column: "correctCount",
                    value: "-1".into()
                },
            ]
        );
    }

    #[test]
    fn correct_count_above_times_asked_is_rejected() {
        let err = QuestionDraft::from_row(row(&[
            ("question", "Q"),
            ("correct_answer", "A"),
            ("wrong_option1", "B"),
            ("timesAsked", "1"),
            ("correctCount", "2"),
        ]))
        .validate()
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "'correctCount' (2) is greater than 'timesAsked' (1)"
        );
    }

    #[test]
    fn record_new_synthesizes_source_and_caps_options() {
        let record = QuestionRecord::new("Q", "A", (1..=9).map(|i| format!("W{i}")));
        assert_eq!(record.wrong_options().len(), MAX_WRONG_OPTIONS);
        assert_eq!(record.source().get("wrong_option7"), Some("W7"));
        assert_eq!(record.source().get("wrong_option8"), None);
        assert_eq!(record.source().get("question"), Some("Q"));
    }
}
