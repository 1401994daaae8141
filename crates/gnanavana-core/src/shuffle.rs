//! Permutations of questions and their options.
//!
//! Reordering is split into a pure `permute` step and an explicit index
//! translation, so fixed permutations can be tested without randomness.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::Question;

/// Whether `permutation` is a permutation of `0..len`.
pub fn is_permutation(permutation: &[usize], len: usize) -> bool {
    if permutation.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    for &i in permutation {
        if i >= len || seen[i] {
            return false;
        }
        seen[i] = true;
    }
    true
}

/// Reorder `items` so that `result[i] == items[permutation[i]]`.
///
/// Returns `None` if `permutation` is not a permutation of the item indices.
pub fn permute<T: Clone>(items: &[T], permutation: &[usize]) -> Option<Vec<T>> {
    if !is_permutation(permutation, items.len()) {
        return None;
    }
    Some(permutation.iter().map(|&i| items[i].clone()).collect())
}

/// Where the element formerly at `old_index` ends up after `permute`.
pub fn remap_index(permutation: &[usize], old_index: usize) -> Option<usize> {
    permutation.iter().position(|&i| i == old_index)
}

/// A uniformly random permutation of `0..len`.
pub fn random_permutation<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<usize> {
    let mut permutation: Vec<usize> = (0..len).collect();
    permutation.shuffle(rng);
    permutation
}

impl Question {
    /// Reorder the options by `permutation`, keeping the correct answer and
    /// per-option explanations attached to the same option text.
    ///
    /// Option explanations are only reordered when they are parallel to the
    /// options. Returns `None` for an invalid permutation.
    pub fn with_option_permutation(&self, permutation: &[usize]) -> Option<Question> {
        let options = permute(&self.options, permutation)?;
        let correct_option_index = remap_index(permutation, self.correct_option_index)?;
        let option_explanations = if self.option_explanations.len() == self.options.len() {
            permute(&self.option_explanations, permutation)?
        } else {
            self.option_explanations.clone()
        };

        Some(Question {
            options,
            correct_option_index,
            option_explanations,
            ..self.clone()
        })
    }

    /// A copy of this question with its options in random order.
    pub fn shuffle_options_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Question {
        let permutation = random_permutation(self.options.len(), rng);
        self.with_option_permutation(&permutation)
            .unwrap_or_else(|| self.clone())
    }

    /// A copy of this question with its options in random order, using the
    /// thread-local generator.
    pub fn shuffle_options(&self) -> Question {
        self.shuffle_options_with_rng(&mut rand::rng())
    }
}

/// Randomise question order, then each question's option order.
pub fn shuffle_questions<R: Rng + ?Sized>(mut questions: Vec<Question>, rng: &mut R) -> Vec<Question> {
    questions.shuffle(rng);
    questions
        .iter()
        .map(|q| q.shuffle_options_with_rng(rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Difficulty;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn question() -> Question {
        Question {
            id: "q".into(),
            question: "Which is prime?".into(),
            options: vec!["4".into(), "6".into(), "7".into(), "9".into()],
            correct_option_index: 2,
            explanation: "7 has no divisors other than 1 and itself.".into(),
            option_explanations: vec![
                "2 x 2".into(),
                "2 x 3".into(),
                "prime".into(),
                "3 x 3".into(),
            ],
            difficulty: Difficulty::Easy,
            tags: vec!["math".into()],
        }
    }

    #[test]
    fn permute_fixed() {
        let items = ["a", "b", "c"];
        assert_eq!(permute(&items, &[2, 0, 1]).unwrap(), vec!["c", "a", "b"]);
        assert_eq!(remap_index(&[2, 0, 1], 0), Some(1));
        assert_eq!(remap_index(&[2, 0, 1], 2), Some(0));
    }

    #[test]
    fn permute_rejects_invalid() {
        let items = [1, 2, 3];
        assert!(permute(&items, &[0, 1]).is_none());
        assert!(permute(&items, &[0, 0, 1]).is_none());
        assert!(permute(&items, &[0, 1, 3]).is_none());
    }

    #[test]
    fn option_permutation_keeps_answer_attached() {
        let q = question();
        let shuffled = q.with_option_permutation(&[3, 2, 1, 0]).unwrap();
        assert_eq!(shuffled.options, vec!["9", "7", "6", "4"]);
        assert_eq!(shuffled.correct_option_index, 1);
        assert_eq!(shuffled.correct_option(), Some("7"));
        assert_eq!(shuffled.option_explanations[1], "prime");
        assert_eq!(shuffled.id, q.id);
    }

    #[test]
    fn non_parallel_explanations_are_left_alone() {
        let mut q = question();
        q.option_explanations.clear();
        let shuffled = q.with_option_permutation(&[1, 0, 3, 2]).unwrap();
        assert!(shuffled.option_explanations.is_empty());
    }

    #[test]
    fn random_shuffle_preserves_correct_option() {
        let q = question();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let shuffled = q.shuffle_options_with_rng(&mut rng);
            assert_eq!(shuffled.correct_option(), q.correct_option());
            let mut sorted = shuffled.options.clone();
            sorted.sort();
            assert_eq!(sorted, q.options);
            let idx = shuffled.correct_option_index;
            assert_eq!(shuffled.option_explanations[idx], "prime");
        }
    }

    #[test]
    fn shuffle_questions_keeps_membership() {
        let mut second = question();
        second.id = "q2".into();
        let mut rng = StdRng::seed_from_u64(1);
        let shuffled = shuffle_questions(vec![question(), second], &mut rng);
        let mut ids: Vec<_> = shuffled.iter().map(|q| q.id.as_str()).collect();
        ids.sort();
        assert_eq!(ids, vec!["q", "q2"]);
    }
}
