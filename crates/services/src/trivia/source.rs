use std::sync::Arc;

use async_trait::async_trait;

use trivia_core::model::{Category, Question, QuestionQuery};

use crate::error::TriviaError;
use super::client::TriviaClient;
use super::config::TriviaConfig;
use super::fixture::FixtureSource;

/// Where quiz questions come from.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// # Errors
    ///
    /// Returns `TriviaError` when no non-empty question set can be produced.
    async fn fetch_questions(&self, query: &QuestionQuery) -> Result<Vec<Question>, TriviaError>;

    /// # Errors
    ///
    /// Returns `TriviaError` when the category listing cannot be obtained.
    async fn fetch_categories(&self) -> Result<Vec<Category>, TriviaError>;
}

#[async_trait]
impl QuestionSource for TriviaClient {
    async fn fetch_questions(&self, query: &QuestionQuery) -> Result<Vec<Question>, TriviaError> {
        TriviaClient::fetch_questions(self, query).await
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, TriviaError> {
        TriviaClient::fetch_categories(self).await
    }
}

/// Construction-time choice between the live API and the built-in fixture set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuestionSourceKind {
    Live(TriviaConfig),
    Fixture,
}

impl QuestionSourceKind {
    /// # Errors
    ///
    /// Returns `TriviaError` if the live client cannot be constructed.
    pub fn build(self) -> Result<Arc<dyn QuestionSource>, TriviaError> {
        match self {
            QuestionSourceKind::Live(config) => Ok(Arc::new(TriviaClient::new(config)?)),
            QuestionSourceKind::Fixture => Ok(Arc::new(FixtureSource::new())),
        }
    }

    #[must_use]
    pub fn is_fixture(&self) -> bool {
        matches!(self, QuestionSourceKind::Fixture)
    }
}
