use thiserror::Error;

use crate::model::question::MAX_WRONG_OPTIONS;

/// File name offered for an export when the upload had no name.
pub const DEFAULT_EXPORT_NAME: &str = "updated_quiz_data.csv";

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("max wrong options must be between 1 and 7, got {0}")]
    InvalidMaxWrongOptions(u8),

    #[error("default export name cannot be empty")]
    EmptyExportName,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Knobs for a quiz session.
///
/// - `max_wrong_options`: how many non-blank wrong options are offered (1..=7)
/// - `seed`: fixes the random source so a session replays identically
/// - `default_export_name`: export file name when the upload had none
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSettings {
    max_wrong_options: u8,
    seed: Option<u64>,
    default_export_name: String,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            max_wrong_options: 7,
            seed: None,
            default_export_name: DEFAULT_EXPORT_NAME.to_owned(),
        }
    }
}

impl QuizSettings {
    /// Creates custom quiz settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if `max_wrong_options` is outside `1..=7`
    /// or `default_export_name` is blank.
    pub fn new(
        max_wrong_options: u8,
        seed: Option<u64>,
        default_export_name: impl Into<String>,
    ) -> Result<Self, SettingsError> {
        if max_wrong_options == 0 || usize::from(max_wrong_options) > MAX_WRONG_OPTIONS {
            return Err(SettingsError::InvalidMaxWrongOptions(max_wrong_options));
        }
        let default_export_name = default_export_name.into();
        if default_export_name.trim().is_empty() {
            return Err(SettingsError::EmptyExportName);
        }

        Ok(Self {
            max_wrong_options,
            seed,
            default_export_name,
        })
    }

    /// Returns a copy with a fixed random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn max_wrong_options(&self) -> usize {
        usize::from(self.max_wrong_options)
    }

    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    #[must_use]
    pub fn default_export_name(&self) -> &str {
        &self.default_export_name
    }
}
