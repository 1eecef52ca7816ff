use std::sync::Arc;

use services::QuizLoopService;
use trivia_core::model::QuestionQuery;

pub trait UiApp: Send + Sync {
    fn quiz_loop(&self) -> Arc<QuizLoopService>;
    fn fixture_mode(&self) -> bool;
}

#[derive(Clone)]
pub struct AppContext {
    quiz_loop: Arc<QuizLoopService>,
    fixture_mode: bool,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            quiz_loop: app.quiz_loop(),
            fixture_mode: app.fixture_mode(),
        }
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    /// Query used when the setup screen leaves a field unset.
    #[must_use]
    pub fn default_query(&self) -> QuestionQuery {
        self.quiz_loop.default_query()
    }

    #[must_use]
    pub fn fixture_mode(&self) -> bool {
        self.fixture_mode
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
