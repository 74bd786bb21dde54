use serde::Serialize;

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionProgress {
    /// Questions loaded.
    pub total: usize,
    /// Questions shown at least once, imported history included.
    pub seen: usize,
    /// Answers given this session.
    pub answered: u32,
    pub score: u32,
    /// Questions skipped because they had no answer options.
    pub skipped: usize,
}
