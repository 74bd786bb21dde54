//! Adaptive choice of the next question.
//!
//! Questions that were never asked come first, drawn uniformly at random, so
//! every question is shown once before anything repeats. After that the
//! question with the lowest correctness rate is resurfaced, deterministically,
//! with ties going to the question loaded first.

use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::model::{CorrectnessRate, QuestionId};
use crate::store::{QuestionBank, QuestionEntry, StoreError};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SelectError {
    #[error("no question is available to select")]
    Empty,

    #[error(transparent)]
    Store(#[from] StoreError),
}

//
// ─── SELECTION ─────────────────────────────────────────────────────────────────
//

/// Why a question was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionReason {
    /// Drawn at random from `unasked` questions that had never been shown.
    FirstShowing { unasked: usize },
    /// Lowest correctness rate among questions already shown.
    Weakest { rate: CorrectnessRate },
}

/// Outcome of a selection. `times_asked` already includes this showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub id: QuestionId,
    pub reason: SelectionReason,
    pub times_asked: u32,
}

/// Select the next question and count it as asked.
///
/// # Errors
///
/// Returns `SelectError::Empty` if the bank has no questions.
pub fn select_next<R: Rng + ?Sized>(
    bank: &mut QuestionBank,
    rng: &mut R,
) -> Result<Selection, SelectError> {
    select_next_where(bank, rng, |_| true)
}

/// Like [`select_next`], restricted to entries for which `eligible` returns true.
///
/// # Errors
///
/// Returns `SelectError::Empty` if no entry is eligible.
pub fn select_next_where<R, F>(
    bank: &mut QuestionBank,
    rng: &mut R,
    mut eligible: F,
) -> Result<Selection, SelectError>
where
    R: Rng + ?Sized,
    F: FnMut(&QuestionEntry) -> bool,
{
    let candidates: Vec<(QuestionId, CorrectnessRate)> = bank
        .iter()
        .filter(|entry| eligible(*entry))
        .map(|entry| (entry.id(), entry.stat().rate()))
        .collect();

    let not_asked: Vec<QuestionId> = candidates
        .iter()
        .filter(|(_, rate)| rate.is_never_asked())
        .map(|(id, _)| *id)
        .collect();

    let (id, reason) = if not_asked.is_empty() {
        // `min_by` keeps the first of equal elements, i.e. load order.
        let (id, rate) = candidates
            .iter()
            .copied()
            .min_by(|a, b| a.1.cmp(&b.1))
            .ok_or(SelectError::Empty)?;
        (id, SelectionReason::Weakest { rate })
    } else {
        let id = not_asked[rng.random_range(0..not_asked.len())];
        (
            id,
            SelectionReason::FirstShowing {
                unasked: not_asked.len(),
            },
        )
    };

    let times_asked = bank.record_asked(id)?.times_asked();
    debug!(question = %id, ?reason, times_asked, "selected next question");

    Ok(Selection {
        id,
        reason,
        times_asked,
    })
}
