use std::collections::HashSet;

use rand::Rng;

use trivia_core::model::{Difficulty, Question, QuestionKind};
use trivia_core::shuffle::shuffle_with;

/// A decoded question with its answer order fixed for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedQuestion {
    category: String,
    kind: QuestionKind,
    difficulty: Difficulty,
    text: String,
    correct_answer: String,
    answers: Vec<String>,
}

impl PreparedQuestion {
    /// Decode every text field and shuffle `{correct} ∪ incorrect`.
    ///
    /// Repeated answer texts are collapsed, keeping the correct one.
    pub fn prepare<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> Self {
        let decoded = question.decoded();
        let mut seen = HashSet::new();
        let candidates: Vec<String> = std::iter::once(decoded.correct_answer())
            .chain(decoded.incorrect_answers().iter().map(String::as_str))
            .filter(|answer| seen.insert(*answer))
            .map(str::to_owned)
            .collect();

        Self {
            category: decoded.category().to_owned(),
            kind: decoded.kind(),
            difficulty: decoded.difficulty(),
            text: decoded.question().to_owned(),
            correct_answer: decoded.correct_answer().to_owned(),
            answers: shuffle_with(&candidates, rng),
        }
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    /// Answers in display order.
    #[must_use]
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    #[must_use]
    pub fn correct_index(&self) -> Option<usize> {
        self.answers.iter().position(|a| *a == self.correct_answer)
    }

    #[must_use]
    pub fn is_correct(&self, index: usize) -> bool {
        self.answers
            .get(index)
            .is_some_and(|answer| *answer == self.correct_answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn question(correct: &str, incorrect: &[&str]) -> Question {
        Question::new(
            "General%20Knowledge",
            QuestionKind::Multiple,
            Difficulty::Easy,
            "Pick%20one",
            correct,
            incorrect.iter().map(|s| (*s).to_string()).collect(),
        )
    }

    #[test]
    fn answers_are_exactly_correct_plus_incorrect() {
        let q = question("Red", &["Green", "Blue", "Yellow"]);
        let mut rng = StdRng::seed_from_u64(1);
        let prepared = PreparedQuestion::prepare(&q, &mut rng);

        let mut answers = prepared.answers().to_vec();
        answers.sort();
        assert_eq!(answers, vec!["Blue", "Green", "Red", "Yellow"]);
        let idx = prepared.correct_index().unwrap();
        assert!(prepared.is_correct(idx));
        assert_eq!(prepared.text(), "Pick one");
        assert_eq!(prepared.category(), "General Knowledge");
    }

    #[test]
    fn duplicate_answers_are_collapsed() {
        let q = question("True", &["False", "True", "False"]);
        let prepared = PreparedQuestion::prepare(&q, &mut StdRng::seed_from_u64(5));
        assert_eq!(prepared.answers().len(), 2);
        assert!(prepared.correct_index().is_some());
    }

    #[test]
    fn answers_are_decoded_before_comparison() {
        let q = question("Bront%C3%AB", &["Austen", "Shelley"]);
        let prepared = PreparedQuestion::prepare(&q, &mut StdRng::seed_from_u64(9));
        assert_eq!(prepared.correct_answer(), "Brontë");
        assert!(prepared.answers().iter().any(|a| a == "Brontë"));
    }

    #[test]
    fn out_of_range_index_is_not_correct() {
        let q = question("A", &["B"]);
        let prepared = PreparedQuestion::prepare(&q, &mut StdRng::seed_from_u64(2));
        assert!(!prepared.is_correct(7));
    }
}
