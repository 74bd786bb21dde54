mod progress;
mod service;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::SessionProgress;
pub use service::{Presentation, QuizSession, SessionPhase};
pub use view::{AnswerFeedback, ExportFile, OptionView, QuestionView, Render, Screen};
pub use workflow::{Event, QuizController};
