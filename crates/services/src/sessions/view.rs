//! Render descriptions handed to whatever UI drives the quiz.

use quiz_core::model::QuestionId;
use serde::Serialize;

/// One answer button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub index: usize,
    pub text: String,
}

/// The question on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub id: QuestionId,
    pub text: String,
    pub options: Vec<OptionView>,
    /// Showings of this question, the current one included.
    pub times_asked: u32,
    pub score: u32,
}

/// Result of answering the question on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerFeedback {
    pub question_id: QuestionId,
    pub selected: String,
    pub is_correct: bool,
    /// Text of the correct option, if the question offered one.
    pub correct_answer: Option<String>,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Screen {
    /// No quiz loaded; ask for a question file.
    Upload,
    /// Waiting for an answer. Options are enabled.
    Question(QuestionView),
    /// Answered. Options are disabled and the advance control is shown.
    Feedback {
        question: QuestionView,
        feedback: AnswerFeedback,
    },
}

/// Exported statistics ready to be offered as a download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportFile {
    pub file_name: String,
    pub contents: String,
    pub rows: usize,
}

/// Everything a UI needs after handling one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Render {
    pub screen: Screen,
    /// Human-readable message for a rejected event.
    pub notice: Option<String>,
    pub download: Option<ExportFile>,
}
