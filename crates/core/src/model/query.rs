use thiserror::Error;

use crate::model::{CategoryId, Difficulty, QuestionKind};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QueryError {
    #[error("question amount must be between 1 and {max}, got {amount}")]
    AmountOutOfRange { amount: u32, max: u32 },

    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),

    #[error("unknown question type: {0}")]
    UnknownKind(String),
}

/// Filters for a single question fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionQuery {
    amount: u32,
    difficulty: Option<Difficulty>,
    kind: Option<QuestionKind>,
    category: Option<CategoryId>,
}

impl QuestionQuery {
    /// Upstream refuses more than this many questions per call.
    pub const MAX_AMOUNT: u32 = 50;
    pub const DEFAULT_AMOUNT: u32 = 10;

    /// # Errors
    ///
    /// Returns `QueryError::AmountOutOfRange` unless `1 <= amount <= MAX_AMOUNT`.
    pub fn new(amount: u32) -> Result<Self, QueryError> {
        if amount == 0 || amount > Self::MAX_AMOUNT {
            return Err(QueryError::AmountOutOfRange {
                amount,
                max: Self::MAX_AMOUNT,
            });
        }
        Ok(Self {
            amount,
            difficulty: None,
            kind: None,
            category: None,
        })
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Option<Difficulty>) -> Self {
        self.difficulty = difficulty;
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: Option<QuestionKind>) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: Option<CategoryId>) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn amount(&self) -> u32 {
        self.amount
    }

    #[must_use]
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    #[must_use]
    pub fn kind(&self) -> Option<QuestionKind> {
        self.kind
    }

    #[must_use]
    pub fn category(&self) -> Option<CategoryId> {
        self.category
    }
}

impl Default for QuestionQuery {
    /// Ten medium questions of any type and category.
    fn default() -> Self {
        Self {
            amount: Self::DEFAULT_AMOUNT,
            difficulty: Some(Difficulty::Medium),
            kind: None,
            category: None,
        }
    }
}
