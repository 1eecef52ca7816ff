use std::fmt;

use rand::Rng;

use trivia_core::model::Question;

use crate::error::QuizError;
use super::prepared::PreparedQuestion;

/// Result of a selection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Recorded { correct: bool },
    /// An answer was already chosen for this question.
    Ignored,
}

/// One question's outcome, for the completion review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionReview {
    pub question: String,
    pub correct_answer: String,
    pub chosen: Option<String>,
    pub correct: bool,
}

/// In-memory quiz over a fixed question list.
///
/// Steps through the questions in order; the score only ever grows.
pub struct QuizSession {
    questions: Vec<PreparedQuestion>,
    current: usize,
    picks: Vec<Option<usize>>,
    score: u32,
}

impl QuizSession {
    /// # Errors
    ///
    /// Returns `QuizError::Empty` if no questions are provided.
    pub fn new(questions: Vec<PreparedQuestion>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::Empty);
        }
        let picks = vec![None; questions.len()];
        Ok(Self {
            questions,
            current: 0,
            picks,
            score: 0,
        })
    }

    /// Decode and shuffle each fetched question once, then start the session.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` if `questions` is empty.
    pub fn prepare<R: Rng + ?Sized>(questions: &[Question], rng: &mut R) -> Result<Self, QuizError> {
        let prepared = questions
            .iter()
            .map(|q| PreparedQuestion::prepare(q, &mut *rng))
            .collect();
        Self::new(prepared)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &PreparedQuestion {
        &self.questions[self.current]
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.picks[self.current]
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    /// The last question has been answered.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.is_last() && self.selected().is_some()
    }

    /// Choose an answer for the current question.
    ///
    /// Only the first selection per question counts.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidAnswer` if `index` is not a displayed answer.
    pub fn select_answer(&mut self, index: usize) -> Result<SelectOutcome, QuizError> {
        let question = &self.questions[self.current];
        let len = question.answers().len();
        if index >= len {
            return Err(QuizError::InvalidAnswer { index, len });
        }
        if self.picks[self.current].is_some() {
            return Ok(SelectOutcome::Ignored);
        }

        let correct = question.is_correct(index);
        self.picks[self.current] = Some(index);
        if correct {
            self.score += 1;
        }
        Ok(SelectOutcome::Recorded { correct })
    }

    /// Move to the next question. Returns `false` on the last question.
    pub fn advance(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.current += 1;
        true
    }

    #[must_use]
    pub fn review(&self) -> Vec<QuestionReview> {
        self.questions
            .iter()
            .zip(&self.picks)
            .map(|(question, pick)| QuestionReview {
                question: question.text().to_owned(),
                correct_answer: question.correct_answer().to_owned(),
                chosen: pick.and_then(|i| question.answers().get(i).cloned()),
                correct: pick.is_some_and(|i| question.is_correct(i)),
            })
            .collect()
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("score", &self.score)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
