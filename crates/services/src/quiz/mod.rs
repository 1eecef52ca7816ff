mod controller;
mod prepared;
mod session;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use controller::{QuizController, QuizStatus};
pub use prepared::PreparedQuestion;
pub use session::{QuestionReview, QuizSession, SelectOutcome};
pub use workflow::QuizLoopService;
