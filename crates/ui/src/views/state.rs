use dioxus::prelude::*;
use services::{QuizError, TriviaError};
use trivia_core::model::ResponseCode;

/// User-facing failure classes. Each maps to one message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    NoQuestions,
    BadFilters,
    RateLimited,
    Token,
    Network,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::NoQuestions => "Not enough questions match these filters. Try a broader selection.",
            ViewError::BadFilters => "The question service rejected these filters.",
            ViewError::RateLimited => "The question service is busy. Wait a few seconds and try again.",
            ViewError::Token => "Your question session expired. Try again to start a new one.",
            ViewError::Network => "Could not reach the question service. Check your connection.",
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }

    #[must_use]
    pub fn from_trivia(err: &TriviaError) -> Self {
        match err {
            TriviaError::EmptyResult | TriviaError::Api(ResponseCode::InsufficientQuestions) => {
                ViewError::NoQuestions
            }
            TriviaError::Api(ResponseCode::InvalidParameter) => ViewError::BadFilters,
            TriviaError::Api(ResponseCode::RateLimited)
            | TriviaError::TooManyRequests { .. }
            | TriviaError::RetriesExhausted { .. } => ViewError::RateLimited,
            TriviaError::Token(_)
            | TriviaError::Api(ResponseCode::TokenNotFound | ResponseCode::TokenExhausted) => {
                ViewError::Token
            }
            TriviaError::Transport(_) | TriviaError::Decode(_) => ViewError::Network,
            _ => ViewError::Unknown,
        }
    }
}

impl From<&QuizError> for ViewError {
    fn from(err: &QuizError) -> Self {
        match err {
            QuizError::Empty => ViewError::NoQuestions,
            QuizError::Source(source) => ViewError::from_trivia(source),
            _ => ViewError::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
