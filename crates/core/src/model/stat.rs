use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StatError {
    #[error("correct count ({correct_count}) exceeds times asked ({times_asked})")]
    CorrectExceedsAsked {
        times_asked: u32,
        correct_count: u32,
    },
}

//
// ─── CORRECTNESS RATE ──────────────────────────────────────────────────────────
//

/// How well a question has been answered so far.
///
/// `NeverAsked` orders below every answered rate. Answered rates compare
/// exactly (`a/b` vs `c/d` via `a*d` vs `c*b`), so `1/2` and `2/4` are equal.
#[derive(Debug, Clone, Copy)]
pub enum CorrectnessRate {
    NeverAsked,
    Answered { correct: u32, asked: u32 },
}

impl CorrectnessRate {
    #[must_use]
    pub fn is_never_asked(&self) -> bool {
        matches!(self, Self::NeverAsked)
    }

    /// Rate in `[0, 1]`, or `None` when the question was never asked.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::NeverAsked => None,
            Self::Answered { asked: 0, .. } => Some(0.0),
            Self::Answered { correct, asked } => Some(f64::from(correct) / f64::from(asked)),
        }
    }
}

impl Ord for CorrectnessRate {
    fn cmp(&self, other: &Self) -> Ordering {
        match (*self, *other) {
            (Self::NeverAsked, Self::NeverAsked) => Ordering::Equal,
            (Self::NeverAsked, Self::Answered { .. }) => Ordering::Less,
            (Self::Answered { .. }, Self::NeverAsked) => Ordering::Greater,
            (
                Self::Answered {
                    correct: c1,
                    asked: a1,
                },
                Self::Answered {
                    correct: c2,
                    asked: a2,
                },
            ) => (u64::from(c1) * u64::from(a2)).cmp(&(u64::from(c2) * u64::from(a1))),
        }
    }
}

impl PartialOrd for CorrectnessRate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CorrectnessRate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CorrectnessRate {}

impl fmt::Display for CorrectnessRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NeverAsked => write!(f, "never asked"),
            Self::Answered { correct, asked } => {
                let rate = self.as_f64().unwrap_or_default();
                write!(f, "{rate:.2} ({correct}/{asked})")
            }
        }
    }
}

//
// ─── QUESTION STAT ─────────────────────────────────────────────────────────────
//

/// Mutable history of one question: how often it was shown and answered correctly.
///
/// Invariant: `correct_count <= times_asked`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionStat {
    times_asked: u32,
    correct_count: u32,
}

impl QuestionStat {
    /// Creates a stat seeded from imported counters.
    ///
    /// # Errors
    ///
    /// Returns `StatError::CorrectExceedsAsked` if `correct_count > times_asked`.
    pub fn new(times_asked: u32, correct_count: u32) -> Result<Self, StatError> {
        if correct_count > times_asked {
            return Err(StatError::CorrectExceedsAsked {
                times_asked,
                correct_count,
            });
        }
        Ok(Self {
            times_asked,
            correct_count,
        })
    }

    #[must_use]
    pub fn times_asked(&self) -> u32 {
        self.times_asked
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn rate(&self) -> CorrectnessRate {
        if self.times_asked == 0 {
            CorrectnessRate::NeverAsked
        } else {
            CorrectnessRate::Answered {
                correct: self.correct_count,
                asked: self.times_asked,
            }
        }
    }

    pub(crate) fn record_asked(&mut self) {
        self.times_asked = self.times_asked.saturating_add(1);
    }

    pub(crate) fn record_correct(&mut self) -> Result<(), StatError> {
        if self.correct_count >= self.times_asked {
            return Err(StatError::CorrectExceedsAsked {
                times_asked: self.times_asked,
                correct_count: self.correct_count.saturating_add(1),
            });
        }
        self.correct_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_more_correct_than_asked() {
        let err = QuestionStat::new(1, 2).unwrap_err();
        assert_eq!(
            err,
            StatError::CorrectExceedsAsked {
                times_asked: 1,
                correct_count: 2
            }
        );
        assert!(QuestionStat::new(2, 2).is_ok());
    }

    #[test]
    fn record_correct_requires_a_prior_ask() {
        let mut stat = QuestionStat::default();
        assert!(stat.record_correct().is_err());

        stat.record_asked();
        stat.record_correct().unwrap();
        assert_eq!(stat.times_asked(), 1);
        assert_eq!(stat.correct_count(), 1);
        assert!(stat.record_correct().is_err());
    }

    #[test]
    fn never_asked_orders_below_any_rate() {
        let never = QuestionStat::default().rate();
        let zero = QuestionStat::new(4, 0).unwrap().rate();
        assert!(never < zero);
        assert!(never.is_never_asked());
        assert_eq!(never.as_f64(), None);
        assert_eq!(zero.as_f64(), Some(0.0));
    }

    #[test]
    fn rates_compare_exactly() {
        let half = QuestionStat::new(2, 1).unwrap().rate();
        let also_half = QuestionStat::new(4, 2).unwrap().rate();
        let third = QuestionStat::new(3, 1).unwrap().rate();
        assert_eq!(half, also_half);
        assert!(third < half);
        assert_eq!(half.to_string(), "0.50 (1/2)");
    }
}
