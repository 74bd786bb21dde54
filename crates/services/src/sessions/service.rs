use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info, warn};

use quiz_core::model::{AnswerLog, QuestionId, QuizSettings, Row, SessionSummary};
use quiz_core::{AnswerOption, Clock, QuestionBank, StoreError, select_next_where, shuffle_options};

use super::progress::SessionProgress;
use super::view::{AnswerFeedback, OptionView, QuestionView, Screen};
use crate::error::SessionError;

//
// ─── PRESENTATION ──────────────────────────────────────────────────────────────
//

/// The question on screen together with its options in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub id: QuestionId,
    pub options: Vec<AnswerOption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    AwaitingAnswer,
    Feedback,
}

//
// ─── QUIZ SESSION ──────────────────────────────────────────────────────────────
//

/// One run through a loaded question bank.
///
/// A session always has a question on screen. It alternates between waiting
/// for an answer and showing feedback, and never completes: once every
/// question has been shown, the weakest one keeps coming back.
pub struct QuizSession {
    bank: QuestionBank,
    max_wrong_options: usize,
    rng: StdRng,
    clock: Clock,
    current: Presentation,
    feedback: Option<AnswerFeedback>,
    score: u32,
    summary: SessionSummary,
    skipped: HashSet<QuestionId>,
}

impl QuizSession {
    /// Starts a session over `bank` and presents the first question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Select` if no question in the bank has any answer option.
    pub fn start(
        mut bank: QuestionBank,
        settings: &QuizSettings,
        clock: Clock,
    ) -> Result<Self, SessionError> {
        let mut rng = settings
            .seed()
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        let max_wrong_options = settings.max_wrong_options();
        let mut skipped = HashSet::new();
        let current = next_presentation(&mut bank, &mut rng, &mut skipped, max_wrong_options)?;

        Ok(Self {
            bank,
            max_wrong_options,
            rng,
            clock,
            current,
            feedback: None,
            score: 0,
            summary: SessionSummary::new(clock.now()),
            skipped,
        })
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn presentation(&self) -> &Presentation {
        &self.current
    }

    /// Feedback for the question on screen, once it has been answered.
    #[must_use]
    pub fn feedback(&self) -> Option<&AnswerFeedback> {
        self.feedback.as_ref()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.feedback.is_some() {
            SessionPhase::Feedback
        } else {
            SessionPhase::AwaitingAnswer
        }
    }

    /// Correct answers given this session.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Answers given this session.
    #[must_use]
    pub fn answered(&self) -> u32 {
        self.summary.answered()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.summary.started_at()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.bank.len(),
            seen: self
                .bank
                .stats()
                .filter(|(_, stat)| stat.times_asked() > 0)
                .count(),
            answered: self.summary.answered(),
            score: self.score,
            skipped: self.skipped.len(),
        }
    }

    /// Records the learner's choice of `option` for question `id`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadyAnswered` if the question on screen was answered already.
    /// Returns `SessionError::StaleAnswer` if `id` is not the question on screen.
    /// Returns `SessionError::UnknownOption` if `option` is out of range.
    pub fn answer(
        &mut self,
        id: QuestionId,
        option: usize,
    ) -> Result<AnswerFeedback, SessionError> {
        if self.feedback.is_some() {
            return Err(SessionError::AlreadyAnswered);
        }
        if id != self.current.id {
            return Err(SessionError::StaleAnswer {
                answered: id,
                current: self.current.id,
            });
        }
        let chosen = self
            .current
            .options
            .get(option)
            .ok_or(SessionError::UnknownOption {
                index: option,
                available: self.current.options.len(),
            })?;
        let is_correct = chosen.is_correct;
        let selected = chosen.text.clone();

        self.summary
            .record(&AnswerLog::new(id, is_correct, self.clock.now()))?;
        if is_correct {
            self.bank.record_correct(id)?;
            self.score += 1;
        }
        info!(question = %id, is_correct, score = self.score, "answer recorded");

        let feedback = AnswerFeedback {
            question_id: id,
            selected,
            is_correct,
            correct_answer: self
                .current
                .options
                .iter()
                .find(|o| o.is_correct)
                .map(|o| o.text.clone()),
            score: self.score,
        };
        self.feedback = Some(feedback.clone());
        Ok(feedback)
    }

    /// Moves past the answered question and presents the next one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotAnswered` while the question on screen is unanswered.
    /// Returns `SessionError::Select` if no presentable question is left.
    pub fn advance(&mut self) -> Result<QuestionId, SessionError> {
        if self.feedback.is_none() {
            return Err(SessionError::NotAnswered);
        }
        self.current = next_presentation(
            &mut self.bank,
            &mut self.rng,
            &mut self.skipped,
            self.max_wrong_options,
        )?;
        self.feedback = None;
        Ok(self.current.id)
    }

    #[must_use]
    pub fn question_view(&self) -> QuestionView {
        let entry = self.bank.get(self.current.id);
        QuestionView {
            id: self.current.id,
            text: entry
                .map(|e| e.record().text().to_owned())
                .unwrap_or_default(),
            options: self
                .current
                .options
                .iter()
                .enumerate()
                .map(|(index, option)| OptionView {
                    index,
                    text: option.text.clone(),
                })
                .collect(),
            times_asked: entry.map_or(0, |e| e.stat().times_asked()),
            score: self.score,
        }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        let question = self.question_view();
        match &self.feedback {
            None => Screen::Question(question),
            Some(feedback) => Screen::Feedback {
                question,
                feedback: feedback.clone(),
            },
        }
    }

    /// Source rows with the current counters written back.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Export` if the bank is empty.
    pub fn export_rows(&self) -> Result<Vec<Row>, SessionError> {
        Ok(storage::export_rows(&self.bank)?)
    }

    /// # Errors
    ///
    /// Returns `SessionError::Export` if the bank is empty or CSV writing fails.
    pub fn export_csv(&self) -> Result<String, SessionError> {
        Ok(storage::export_csv(&self.bank)?)
    }

    #[must_use]
    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions", &self.bank.len())
            .field("current", &self.current.id)
            .field("phase", &self.phase())
            .field("score", &self.score)
            .field("answered", &self.summary.answered())
            .field("skipped", &self.skipped.len())
            .field("started_at", &self.summary.started_at())
            .finish_non_exhaustive()
    }
}

/// Selects questions until one has something to offer.
///
/// Questions without options are skipped for the rest of the session. Their
/// showing has already been counted by then.
fn next_presentation(
    bank: &mut QuestionBank,
    rng: &mut StdRng,
    skipped: &mut HashSet<QuestionId>,
    max_wrong_options: usize,
) -> Result<Presentation, SessionError> {
    loop {
        let selection = select_next_where(bank, rng, |entry| !skipped.contains(&entry.id()))?;
        let entry = bank
            .get(selection.id)
            .ok_or(StoreError::UnknownQuestion(selection.id))?;
        let options = shuffle_options(entry.record(), max_wrong_options, rng);

        if options.is_empty() {
            warn!(
                question = %selection.id,
                text = entry.record().text(),
                "question has no answer options; skipping it"
            );
            skipped.insert(selection.id);
            continue;
        }

        debug!(question = %selection.id, options = options.len(), "presenting question");
        return Ok(Presentation {
            id: selection.id,
            options,
        });
    }
}
