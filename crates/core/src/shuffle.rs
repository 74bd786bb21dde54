use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{MAX_WRONG_OPTIONS, QuestionRecord};

/// One answer choice as presented to the learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub text: String,
    pub is_correct: bool,
}

/// Answer choices of `record` in source order: the correct answer first, then
/// up to `max_wrong` wrong options. Blank entries are left out.
#[must_use]
pub fn candidate_options(record: &QuestionRecord, max_wrong: usize) -> Vec<AnswerOption> {
    let max_wrong = max_wrong.min(MAX_WRONG_OPTIONS);
    let correct = (!record.correct_answer().trim().is_empty()).then(|| AnswerOption {
        text: record.correct_answer().to_owned(),
        is_correct: true,
    });
    let wrong = record
        .wrong_options()
        .iter()
        .filter(|text| !text.trim().is_empty())
        .take(max_wrong)
        .map(|text| AnswerOption {
            text: text.clone(),
            is_correct: false,
        });

    correct.into_iter().chain(wrong).collect()
}

/// Fisher-Yates: every permutation of `items` is equally likely.
pub fn shuffle_in_place<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Candidate options of `record` in random order.
///
/// An empty result means the question has nothing to offer and should be skipped.
pub fn shuffle_options<R: Rng + ?Sized>(
    record: &QuestionRecord,
    max_wrong: usize,
    rng: &mut R,
) -> Vec<AnswerOption> {
    let mut options = candidate_options(record, max_wrong);
    shuffle_in_place(&mut options, rng);
    debug!(options = options.len(), "shuffled answer options");
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    #[test]
    fn candidates_skip_blanks_and_keep_source_order() {
        let record = QuestionRecord::new("Q", "right", ["w1", "  ", "w3"]);
        let options = candidate_options(&record, 7);

        let texts: Vec<_> = options.iter().map(|o| o.text.as_str()).collect();
        assert_eq!(texts, ["right", "w1", "w3"]);
        assert!(options[0].is_correct);
        assert!(options[1..].iter().all(|o| !o.is_correct));
    }

    #[test]
    fn candidates_respect_wrong_option_limit() {
        let record = QuestionRecord::new("Q", "right", ["w1", "", "w3", "w4"]);
        let options = candidate_options(&record, 2);

        let texts: Vec<_> = options.iter().map(|o| o.text.as_str()).collect();
        assert_eq!(texts, ["right", "w1", "w3"]);
    }

    #[test]
    fn blank_question_yields_no_options() {
        let record = QuestionRecord::new("Q", " ", ["", "\t"]);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(shuffle_options(&record, 7, &mut rng).is_empty());
    }

    #[test]
    fn blank_correct_answer_leaves_only_wrong_options() {
        let record = QuestionRecord::new("Q", "", ["w1"]);
        let options = candidate_options(&record, 7);
        assert_eq!(options.len(), 1);
        assert!(!options[0].is_correct);
    }

    #[test]
    fn shuffle_keeps_every_option() {
        let record = QuestionRecord::new("Q", "A", ["B", "C", "D", "E", "F", "G", "H"]);
        let mut rng = StdRng::seed_from_u64(3);
        let mut texts: Vec<_> = shuffle_options(&record, 7, &mut rng)
            .into_iter()
            .map(|o| o.text)
            .collect();
        texts.sort();
        assert_eq!(texts, ["A", "B", "C", "D", "E", "F", "G", "H"]);
    }

    #[test]
    fn correct_answer_lands_in_each_position_evenly() {
        let record = QuestionRecord::new("Q", "A", ["B", "C", "D"]);
        let mut rng = StdRng::seed_from_u64(42);
        let mut positions = [0_u32; 4];
        let trials = 40_000;

        for _ in 0..trials {
            let options = shuffle_options(&record, 7, &mut rng);
            let pos = options.iter().position(|o| o.is_correct).unwrap();
            positions[pos] += 1;
        }

        for count in positions {
            assert!(
                (9_200..=10_800).contains(&count),
                "biased shuffle: {positions:?}"
            );
        }
    }

    #[test]
    fn all_permutations_are_reachable() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut seen: HashMap<[u8; 3], u32> = HashMap::new();

        for _ in 0..6_000 {
            let mut items = [1_u8, 2, 3];
            shuffle_in_place(&mut items, &mut rng);
            *seen.entry(items).or_default() += 1;
        }

        assert_eq!(seen.len(), 6);
        assert!(seen.values().all(|&n| (800..=1_200).contains(&n)), "{seen:?}");
    }
}
