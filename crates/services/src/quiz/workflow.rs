use std::sync::Arc;

use tracing::{debug, info};

use trivia_core::model::{Category, Question, QuestionQuery};

use crate::error::TriviaError;
use crate::trivia::QuestionSource;
use super::controller::QuizController;

/// Connects a [`QuestionSource`] to the quiz state machine.
#[derive(Clone)]
pub struct QuizLoopService {
    source: Arc<dyn QuestionSource>,
    default_query: QuestionQuery,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>) -> Self {
        Self {
            source,
            default_query: QuestionQuery::default(),
        }
    }

    #[must_use]
    pub fn with_default_query(mut self, query: QuestionQuery) -> Self {
        self.default_query = query;
        self
    }

    #[must_use]
    pub fn default_query(&self) -> QuestionQuery {
        self.default_query
    }

    /// Fetch a question set for `query`.
    ///
    /// # Errors
    ///
    /// Returns `TriviaError` from the underlying source.
    pub async fn fetch_questions(&self, query: &QuestionQuery) -> Result<Vec<Question>, TriviaError> {
        debug!(amount = query.amount(), "fetching questions");
        self.source.fetch_questions(query).await
    }

    /// List categories for the setup screen.
    ///
    /// # Errors
    ///
    /// Returns `TriviaError` from the underlying source.
    pub async fn categories(&self) -> Result<Vec<Category>, TriviaError> {
        self.source.fetch_categories().await
    }

    /// Drive one Loading → Ready/Error transition.
    ///
    /// Returns `false` without fetching when the controller refuses a new fetch.
    pub async fn run_load(&self, controller: &mut QuizController, query: &QuestionQuery) -> bool {
        if !controller.begin_fetch() {
            return false;
        }
        let result = self.fetch_questions(query).await;
        controller.complete_fetch(result);
        info!(status = ?controller.status(), "quiz load finished");
        true
    }
}

impl std::fmt::Debug for QuizLoopService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizLoopService")
            .field("default_query", &self.default_query)
            .finish_non_exhaustive()
    }
}
