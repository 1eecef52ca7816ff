use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::QueryError;
use crate::text::decode;

//
// ─── ENUMS ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Value used in the `difficulty` query parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(QueryError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Question format: four-way multiple choice or true/false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Multiple,
    Boolean,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 2] = [QuestionKind::Multiple, QuestionKind::Boolean];

    /// Value used in the `type` query parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionKind::Multiple => "multiple",
            QuestionKind::Boolean => "boolean",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionKind {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "multiple" => Ok(QuestionKind::Multiple),
            "boolean" => Ok(QuestionKind::Boolean),
            _ => Err(QueryError::UnknownKind(s.to_string())),
        }
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A trivia question as delivered by the upstream API.
///
/// Text fields are kept exactly as received; call [`Question::decoded`] before
/// display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    category: String,
    #[serde(rename = "type")]
    kind: QuestionKind,
    difficulty: Difficulty,
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
}

impl Question {
    #[must_use]
    pub fn new(
        category: impl Into<String>,
        kind: QuestionKind,
        difficulty: Difficulty,
        question: impl Into<String>,
        correct_answer: impl Into<String>,
        incorrect_answers: Vec<String>,
    ) -> Self {
        Self {
            category: category.into(),
            kind,
            difficulty,
            question: question.into(),
            correct_answer: correct_answer.into(),
            incorrect_answers,
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
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn incorrect_answers(&self) -> &[String] {
        &self.incorrect_answers
    }

    /// Returns a copy with every text field run through [`decode`].
    #[must_use]
    pub fn decoded(&self) -> Self {
        Self {
            category: decode(&self.category),
            kind: self.kind,
            difficulty: self.difficulty,
            question: decode(&self.question),
            correct_answer: decode(&self.correct_answer),
            incorrect_answers: self.incorrect_answers.iter().map(|a| decode(a)).collect(),
        }
    }
}
