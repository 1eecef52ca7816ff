#![forbid(unsafe_code)]

pub mod error;
pub mod quiz;
pub mod trivia;

pub use trivia_core::Clock;

pub use error::{QuizError, TokenError, TransportError, TriviaError};
pub use quiz::{
    PreparedQuestion, QuestionReview, QuizController, QuizLoopService, QuizSession, QuizStatus,
    SelectOutcome,
};
pub use trivia::{FixtureSource, QuestionSource, QuestionSourceKind, TriviaClient, TriviaConfig};
