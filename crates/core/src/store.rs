use thiserror::Error;
use tracing::warn;

use crate::model::{QuestionId, QuestionRecord, QuestionStat, StatError, ValidatedQuestion};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreError {
    #[error("no question with id {0}")]
    UnknownQuestion(QuestionId),

    #[error("question {id}: {source}")]
    Stat {
        id: QuestionId,
        #[source]
        source: StatError,
    },
}

//
// ─── ENTRY ─────────────────────────────────────────────────────────────────────
//

/// A question's static record paired with its mutable statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionEntry {
    id: QuestionId,
    record: QuestionRecord,
    stat: QuestionStat,
}

impl QuestionEntry {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn record(&self) -> &QuestionRecord {
        &self.record
    }

    #[must_use]
    pub fn stat(&self) -> &QuestionStat {
        &self.stat
    }
}

/// What `QuestionBank::from_parallel` had to do to line records and stats up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rehydration {
    Intact,
    /// Stats did not correspond to records and were reset to zero.
    Regenerated { records: usize, stats: usize },
}

//
// ─── QUESTION BANK ─────────────────────────────────────────────────────────────
//

/// Statistics store: every question of a session, addressed by `QuestionId`.
///
/// An entry's id always equals its position, so records and stats cannot drift apart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBank {
    entries: Vec<QuestionEntry>,
}

impl QuestionBank {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_validated(questions: impl IntoIterator<Item = ValidatedQuestion>) -> Self {
        let mut bank = Self::new();
        for question in questions {
            bank.push(question.record, question.stat);
        }
        bank
    }

    /// Rebuilds a bank from separately held records and `(id, stat)` pairs.
    ///
    /// The pairs must have the same length as `records` and `stats[i].0 == i`.
    /// Otherwise every stat is regenerated as zero and prior counts are lost.
    #[must_use]
    pub fn from_parallel(
        records: Vec<QuestionRecord>,
        stats: Vec<(QuestionId, QuestionStat)>,
    ) -> (Self, Rehydration) {
        let aligned = records.len() == stats.len()
            && stats.iter().enumerate().all(|(i, (id, _))| id.index() == i);

        let rehydration = if aligned {
            Rehydration::Intact
        } else {
            warn!(
                records = records.len(),
                stats = stats.len(),
                "question stats out of sync with records; regenerating from scratch"
            );
            Rehydration::Regenerated {
                records: records.len(),
                stats: stats.len(),
            }
        };

        let mut bank = Self::new();
        let mut stats = stats.into_iter();
        for record in records {
            let stat = match rehydration {
                Rehydration::Intact => stats.next().map(|(_, stat)| stat).unwrap_or_default(),
                Rehydration::Regenerated { .. } => QuestionStat::default(),
            };
            bank.push(record, stat);
        }
        (bank, rehydration)
    }

    /// Appends a question and returns its id.
    pub fn push(&mut self, record: QuestionRecord, stat: QuestionStat) -> QuestionId {
        let id = QuestionId::new(self.entries.len());
        self.entries.push(QuestionEntry { id, record, stat });
        id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: QuestionId) -> Option<&QuestionEntry> {
        self.entries.get(id.index())
    }

    #[must_use]
    pub fn entries(&self) -> &[QuestionEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionEntry> {
        self.entries.iter()
    }

    pub fn stats(&self) -> impl Iterator<Item = (QuestionId, &QuestionStat)> {
        self.entries.iter().map(|entry| (entry.id, &entry.stat))
    }

    /// Counts one more showing of `id`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UnknownQuestion` if `id` is not in the bank.
    pub fn record_asked(&mut self, id: QuestionId) -> Result<&QuestionStat, StoreError> {
        let entry = self.entry_mut(id)?;
        entry.stat.record_asked();
        debug_assert!(entry.stat.correct_count() <= entry.stat.times_asked());
        Ok(&entry.stat)
    }

    /// Counts one more correct answer for `id`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UnknownQuestion` if `id` is not in the bank.
    /// Returns `StoreError::Stat` if the question has no showing left to credit.
    pub fn record_correct(&mut self, id: QuestionId) -> Result<&QuestionStat, StoreError> {
        let entry = self.entry_mut(id)?;
        entry
            .stat
            .record_correct()
            .map_err(|source| StoreError::Stat { id, source })?;
        debug_assert!(entry.stat.correct_count() <= entry.stat.times_asked());
        Ok(&entry.stat)
    }

    fn entry_mut(&mut self, id: QuestionId) -> Result<&mut QuestionEntry, StoreError> {
        self.entries
            .get_mut(id.index())
            .ok_or(StoreError::UnknownQuestion(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(text: &str) -> QuestionRecord {
        QuestionRecord::new(text, "A", ["B"])
    }

    #[test]
    fn push_assigns_positional_ids() {
        let mut bank = QuestionBank::new();
        let first = bank.push(record("Q1"), QuestionStat::default());
        let second = bank.push(record("Q2"), QuestionStat::new(3, 1).unwrap());

        assert_eq!(first, QuestionId::new(0));
        assert_eq!(second, QuestionId::new(1));
        assert_eq!(bank.get(second).unwrap().record().text(), "Q2");
        assert_eq!(bank.get(second).unwrap().stat().times_asked(), 3);
    }

    #[test]
    fn record_asked_then_correct() {
        let mut bank = QuestionBank::new();
        let id = bank.push(record("Q"), QuestionStat::default());

        assert_eq!(bank.record_asked(id).unwrap().times_asked(), 1);
        assert_eq!(bank.record_correct(id).unwrap().correct_count(), 1);
    }

    #[test]
    fn record_correct_without_showing_is_refused() {
        let mut bank = QuestionBank::new();
        let id = bank.push(record("Q"), QuestionStat::default());

        let err = bank.record_correct(id).unwrap_err();
        assert!(matches!(err, StoreError::Stat { .. }));
        assert_eq!(bank.get(id).unwrap().stat().correct_count(), 0);
    }

    #[test]
    fn unknown_id_is_reported() {
        let mut bank = QuestionBank::new();
        let err = bank.record_asked(QuestionId::new(4)).unwrap_err();
        assert_eq!(err.to_string(), "no question with id 4");
    }

    #[test]
    fn from_parallel_keeps_aligned_stats() {
        let stats = vec![
            (QuestionId::new(0), QuestionStat::new(2, 1).unwrap()),
            (QuestionId::new(1), QuestionStat::new(5, 5).unwrap()),
        ];
        let (bank, rehydration) = QuestionBank::from_parallel(vec![record("a"), record("b")], stats);

        assert_eq!(rehydration, Rehydration::Intact);
        assert_eq!(bank.get(QuestionId::new(1)).unwrap().stat().correct_count(), 5);
    }

    #[test]
    fn from_parallel_regenerates_on_length_mismatch() {
        let stats = vec![(QuestionId::new(0), QuestionStat::new(2, 1).unwrap())];
        let (bank, rehydration) = QuestionBank::from_parallel(vec![record("a"), record("b")], stats);

        assert_eq!(
            rehydration,
            Rehydration::Regenerated {
                records: 2,
                stats: 1
            }
        );
        assert_eq!(bank.len(), 2);
        assert!(bank.stats().all(|(_, stat)| *stat == QuestionStat::default()));
    }

    #[test]
    fn from_parallel_regenerates_on_index_mismatch() {
        let stats = vec![
            (QuestionId::new(1), QuestionStat::new(2, 1).unwrap()),
            (QuestionId::new(0), QuestionStat::new(1, 0).unwrap()),
        ];
        let (bank, rehydration) = QuestionBank::from_parallel(vec![record("a"), record("b")], stats);

        assert!(matches!(rehydration, Rehydration::Regenerated { .. }));
        assert_eq!(bank.get(QuestionId::new(0)).unwrap().stat().times_asked(), 0);
    }
}
