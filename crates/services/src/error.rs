//! Shared error types for the services crate.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

use trivia_core::model::ResponseCode;

/// Failures below the JSON layer: connection problems and unexpected statuses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("connection error: {0}")]
    Connection(String),
    #[error("trivia endpoint responded with status {0}")]
    Status(StatusCode),
}

/// Session token could not be obtained or is no longer valid.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TokenError {
    #[error("session token unavailable: {code}")]
    Unavailable { code: ResponseCode },
    #[error("session token not recognised by the trivia api")]
    NotFound,
    #[error("session token exhausted after reset")]
    Exhausted,
    #[error("session token reset failed: {code}")]
    ResetFailed { code: ResponseCode },
}

/// Errors emitted by question sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TriviaError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("too many requests, retry in {retry_after:?}")]
    TooManyRequests { retry_after: Duration },
    #[error("rate limited, gave up after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },
    #[error("trivia api error: {0}")]
    Api(ResponseCode),
    #[error("trivia api returned no questions")]
    EmptyResult,
    #[error("malformed trivia api response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid trivia endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

impl TriviaError {
    /// True for throttling outcomes: cooldown rejections and exhausted backoff.
    #[must_use]
    pub fn is_throttled(&self) -> bool {
        matches!(
            self,
            TriviaError::TooManyRequests { .. } | TriviaError::RetriesExhausted { .. }
        )
    }
}

/// Errors emitted by the quiz controller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no questions available for quiz")]
    Empty,
    #[error("quiz is not accepting answers")]
    NotReady,
    #[error("answer {index} out of range for {len} choices")]
    InvalidAnswer { index: usize, len: usize },
    #[error(transparent)]
    Source(#[from] TriviaError),
}
