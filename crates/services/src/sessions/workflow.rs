//! Application-level quiz flow: loading, answering, advancing, restarting, exporting.
//!
//! `QuizController` owns at most one `QuizSession`. Without one it is idle and
//! shows the upload screen.

use tracing::{error, info, warn};

use quiz_core::model::{QuestionId, QuizSettings, Row, SessionSummary, ValidatedQuestion};
use quiz_core::{Clock, QuestionBank};

use super::service::QuizSession;
use super::view::{ExportFile, Render, Screen};
use crate::error::SessionError;

/// Something the learner did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A CSV file was chosen. `name` is its file name, if known.
    FileLoaded {
        name: Option<String>,
        contents: String,
    },
    /// Rows were parsed elsewhere, e.g. from a spreadsheet.
    RowsLoaded {
        name: Option<String>,
        rows: Vec<Row>,
    },
    Answered {
        question: QuestionId,
        option: usize,
    },
    Advance,
    Restart,
    ExportRequested,
}

struct ActiveQuiz {
    session: QuizSession,
    source_name: Option<String>,
}

pub struct QuizController {
    settings: QuizSettings,
    clock: Clock,
    active: Option<ActiveQuiz>,
}

impl QuizController {
    #[must_use]
    pub fn new(settings: QuizSettings) -> Self {
        Self {
            settings,
            clock: Clock::default(),
            active: None,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    /// True when no quiz is loaded.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        self.active.as_ref().map(|active| &active.session)
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.session().map_or(Screen::Upload, QuizSession::screen)
    }

    /// Replaces any running quiz with the questions in `contents`.
    ///
    /// The previous quiz is discarded even if loading fails.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Load` if the CSV is malformed, empty or has invalid rows.
    /// Returns `SessionError::Select` if no question has any answer option.
    pub fn load_csv(&mut self, contents: &str, name: Option<&str>) -> Result<Screen, SessionError> {
        self.active = None;
        let questions = storage::import_csv(contents).inspect_err(|err| {
            error!(file = name, %err, "question file rejected");
        })?;
        self.start(questions, name)
    }

    /// Like [`QuizController::load_csv`] for rows that are already parsed.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Load` if there are no rows or some are invalid.
    /// Returns `SessionError::Select` if no question has any answer option.
    pub fn load_rows(&mut self, rows: Vec<Row>, name: Option<&str>) -> Result<Screen, SessionError> {
        self.active = None;
        let questions = storage::import_rows(rows).inspect_err(|err| {
            error!(file = name, %err, "question rows rejected");
        })?;
        self.start(questions, name)
    }

    fn start(
        &mut self,
        questions: Vec<ValidatedQuestion>,
        name: Option<&str>,
    ) -> Result<Screen, SessionError> {
        let bank = QuestionBank::from_validated(questions);
        let session = QuizSession::start(bank, &self.settings, self.clock)?;
        info!(
            file = name,
            questions = session.bank().len(),
            "quiz started"
        );

        let screen = session.screen();
        self.active = Some(ActiveQuiz {
            session,
            source_name: name.map(str::to_owned),
        });
        Ok(screen)
    }

    /// # Errors
    ///
    /// Returns `SessionError::NotLoaded` when idle, otherwise see [`QuizSession::answer`].
    pub fn answer(&mut self, question: QuestionId, option: usize) -> Result<Screen, SessionError> {
        let session = self.session_mut()?;
        session.answer(question, option)?;
        Ok(session.screen())
    }

    /// Presents the next question.
    ///
    /// If no question can be selected the quiz is dropped and the controller goes idle.
    /// A started quiz cannot get there: the question just answered had options and
    /// stays eligible.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotLoaded` when idle, otherwise see [`QuizSession::advance`].
    pub fn advance(&mut self) -> Result<Screen, SessionError> {
        let session = self.session_mut()?;
        match session.advance() {
            Ok(_) => Ok(session.screen()),
            Err(err) => {
                if matches!(err, SessionError::Select(_)) {
                    error!(%err, "no question left to present; returning to upload");
                    self.active = None;
                }
                Err(err)
            }
        }
    }

    /// Drops the running quiz, if any, and returns to the upload screen.
    pub fn restart(&mut self) -> Screen {
        if let Some(active) = self.active.take() {
            info!(
                answered = active.session.answered(),
                score = active.session.score(),
                "quiz restarted"
            );
        }
        Screen::Upload
    }

    /// Current statistics as a CSV file named after the uploaded file.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NothingToExport` when idle, or `SessionError::Export` if writing fails.
    pub fn export(&self) -> Result<ExportFile, SessionError> {
        let active = self.active.as_ref().ok_or(SessionError::NothingToExport)?;
        let contents = active.session.export_csv()?;
        let file_name = active
            .source_name
            .clone()
            .unwrap_or_else(|| self.settings.default_export_name().to_owned());

        Ok(ExportFile {
            file_name,
            contents,
            rows: active.session.bank().len(),
        })
    }

    /// # Errors
    ///
    /// Returns `SessionError::NotLoaded` when idle.
    pub fn summary(&self) -> Result<SessionSummary, SessionError> {
        self.session()
            .map(|session| session.summary().clone())
            .ok_or(SessionError::NotLoaded)
    }

    /// Applies `event` and describes what to show next.
    ///
    /// Errors never escape: they leave the state as the operation left it and
    /// come back as `notice`.
    pub fn dispatch(&mut self, event: Event) -> Render {
        let outcome = match event {
            Event::FileLoaded { name, contents } => self
                .load_csv(&contents, name.as_deref())
                .map(|_| None),
            Event::RowsLoaded { name, rows } => {
                self.load_rows(rows, name.as_deref()).map(|_| None)
            }
            Event::Answered { question, option } => self.answer(question, option).map(|_| None),
            Event::Advance => self.advance().map(|_| None),
            Event::Restart => {
                self.restart();
                Ok(None)
            }
            Event::ExportRequested => self.export().map(Some),
        };

        match outcome {
            Ok(download) => Render {
                screen: self.screen(),
                notice: None,
                download,
            },
            Err(err) => {
                warn!(%err, "event rejected");
                Render {
                    screen: self.screen(),
                    notice: Some(err.to_string()),
                    download: None,
                }
            }
        }
    }

    fn session_mut(&mut self) -> Result<&mut QuizSession, SessionError> {
        self.active
            .as_mut()
            .map(|active| &mut active.session)
            .ok_or(SessionError::NotLoaded)
    }
}

impl Default for QuizController {
    fn default() -> Self {
        Self::new(QuizSettings::default())
    }
}
