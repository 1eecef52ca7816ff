use std::fmt;

/// Numeric `response_code` carried in every question and token payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseCode {
    Success,
    /// Not enough questions match the filters for the requested amount.
    InsufficientQuestions,
    InvalidParameter,
    TokenNotFound,
    /// The token has already served every matching question.
    TokenExhausted,
    RateLimited,
    Unknown(i64),
}

impl ResponseCode {
    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            ResponseCode::Success => 0,
            ResponseCode::InsufficientQuestions => 1,
            ResponseCode::InvalidParameter => 2,
            ResponseCode::TokenNotFound => 3,
            ResponseCode::TokenExhausted => 4,
            ResponseCode::RateLimited => 5,
            ResponseCode::Unknown(code) => code,
        }
    }

    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, ResponseCode::Success)
    }
}

impl From<i64> for ResponseCode {
    fn from(code: i64) -> Self {
        match code {
            0 => ResponseCode::Success,
            1 => ResponseCode::InsufficientQuestions,
            2 => ResponseCode::InvalidParameter,
            3 => ResponseCode::TokenNotFound,
            4 => ResponseCode::TokenExhausted,
            5 => ResponseCode::RateLimited,
            other => ResponseCode::Unknown(other),
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ResponseCode::Success => "success",
            ResponseCode::InsufficientQuestions => "insufficient questions",
            ResponseCode::InvalidParameter => "invalid parameter",
            ResponseCode::TokenNotFound => "token not found",
            ResponseCode::TokenExhausted => "token exhausted",
            ResponseCode::RateLimited => "rate limited",
            ResponseCode::Unknown(_) => "unknown",
        };
        write!(f, "{label} (code {})", self.code())
    }
}
