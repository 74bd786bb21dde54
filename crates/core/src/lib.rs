#![forbid(unsafe_code)]

pub mod model;
pub mod selector;
pub mod shuffle;
pub mod store;
pub mod time;

pub use selector::{SelectError, Selection, SelectionReason, select_next, select_next_where};
pub use shuffle::{AnswerOption, candidate_options, shuffle_in_place, shuffle_options};
pub use store::{QuestionBank, QuestionEntry, Rehydration, StoreError};
pub use time::Clock;
