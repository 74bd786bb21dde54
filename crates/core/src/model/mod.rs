mod answer;
mod ids;
mod question;
mod row;
mod session;
mod settings;
mod stat;

pub use answer::AnswerLog;
pub use ids::QuestionId;
pub use question::{
    MAX_WRONG_OPTIONS, QuestionDraft, QuestionError, QuestionProblem, QuestionRecord,
    ValidatedQuestion, columns,
};
pub use row::Row;
pub use session::{SessionSummary, SessionSummaryError};
pub use settings::{DEFAULT_EXPORT_NAME, QuizSettings, SettingsError};
pub use stat::{CorrectnessRate, QuestionStat, StatError};
