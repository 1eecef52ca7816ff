use async_trait::async_trait;
use tracing::debug;

use trivia_core::model::{Category, Difficulty, Question, QuestionKind, QuestionQuery};

use crate::error::TriviaError;
use super::source::QuestionSource;

struct FixtureEntry {
    category: &'static str,
    kind: QuestionKind,
    difficulty: Difficulty,
    question: &'static str,
    correct: &'static str,
    incorrect: &'static [&'static str],
}

// Entity-encoded the way the API's default encoding delivers text.
const FIXTURE_QUESTIONS: &[FixtureEntry] = &[
    FixtureEntry {
        category: "Science &amp; Nature",
        kind: QuestionKind::Multiple,
        difficulty: Difficulty::Medium,
        question: "What is the chemical symbol for gold?",
        correct: "Au",
        incorrect: &["Ag", "Gd", "Go"],
    },
    FixtureEntry {
        category: "Entertainment: Books",
        kind: QuestionKind::Multiple,
        difficulty: Difficulty::Medium,
        question: "Who wrote &quot;Pride and Prejudice&quot;?",
        correct: "Jane Austen",
        incorrect: &["Charlotte Bront&euml;", "Mary Shelley", "George Eliot"],
    },
    FixtureEntry {
        category: "Geography",
        kind: QuestionKind::Boolean,
        difficulty: Difficulty::Easy,
        question: "Canberra is the capital of Australia.",
        correct: "True",
        incorrect: &["False"],
    },
    FixtureEntry {
        category: "Science: Computers",
        kind: QuestionKind::Multiple,
        difficulty: Difficulty::Hard,
        question: "In which year did Rust&#039;s 1.0 release ship?",
        correct: "2015",
        incorrect: &["2012", "2010", "2018"],
    },
    FixtureEntry {
        category: "History",
        kind: QuestionKind::Boolean,
        difficulty: Difficulty::Medium,
        question: "The Great Fire of London happened in 1666.",
        correct: "True",
        incorrect: &["False"],
    },
];

const FIXTURE_CATEGORIES: &[(u32, &str)] = &[
    (9, "General Knowledge"),
    (10, "Entertainment: Books"),
    (17, "Science & Nature"),
    (18, "Science: Computers"),
    (22, "Geography"),
    (23, "History"),
];

/// The built-in question set served in fixture mode.
#[must_use]
pub fn fixture_questions() -> Vec<Question> {
    FIXTURE_QUESTIONS
        .iter()
        .map(|entry| {
            Question::new(
                entry.category,
                entry.kind,
                entry.difficulty,
                entry.question,
                entry.correct,
                entry.incorrect.iter().map(|a| (*a).to_string()).collect(),
            )
        })
        .collect()
}

#[must_use]
pub fn fixture_categories() -> Vec<Category> {
    FIXTURE_CATEGORIES
        .iter()
        .map(|(id, name)| Category::new(*id, *name))
        .collect()
}

/// Offline question source returning a fixed set without touching the network.
///
/// The query is ignored: every fetch yields the same questions.
#[derive(Clone, Debug)]
pub struct FixtureSource {
    questions: Vec<Question>,
    categories: Vec<Category>,
}

impl FixtureSource {
    #[must_use]
    pub fn new() -> Self {
        Self::with_questions(fixture_questions())
    }

    #[must_use]
    pub fn with_questions(questions: Vec<Question>) -> Self {
        Self {
            questions,
            categories: fixture_categories(),
        }
    }
}

impl Default for FixtureSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuestionSource for FixtureSource {
    async fn fetch_questions(&self, query: &QuestionQuery) -> Result<Vec<Question>, TriviaError> {
        debug!(requested = query.amount(), served = self.questions.len(), "serving fixture questions");
        if self.questions.is_empty() {
            return Err(TriviaError::EmptyResult);
        }
        Ok(self.questions.clone())
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, TriviaError> {
        Ok(self.categories.clone())
    }
}
