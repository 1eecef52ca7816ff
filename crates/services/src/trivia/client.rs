use std::fmt;
use std::sync::Arc;

use reqwest::StatusCode;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use trivia_core::Clock;
use trivia_core::model::{Category, Question, QuestionQuery, ResponseCode};

use crate::error::{TokenError, TransportError, TriviaError};
use super::config::TriviaConfig;
use super::throttle::{Cooldown, RetryBudget};
use super::transport::{ReqwestTransport, TriviaTransport};
use super::wire::{CategoriesResponse, QuestionsResponse, TokenResponse};

struct ClientState {
    token: Option<String>,
}

/// Live Open Trivia DB client.
///
/// Owns the session token and the cooldown timestamp. Token-bearing calls hold
/// the state lock for their whole duration, so they never interleave on one
/// client. The cooldown sits behind its own lock, taken only to check and
/// stamp, so a call made while another is in flight is rejected at once.
pub struct TriviaClient {
    config: TriviaConfig,
    transport: Arc<dyn TriviaTransport>,
    clock: Clock,
    cooldown: Mutex<Cooldown>,
    state: Mutex<ClientState>,
}

impl TriviaClient {
    /// Build a client backed by `reqwest`.
    ///
    /// # Errors
    ///
    /// Returns `TriviaError` if an endpoint is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: TriviaConfig) -> Result<Self, TriviaError> {
        config.validate()?;
        let transport = ReqwestTransport::new(config.request_timeout)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    #[must_use]
    pub fn with_transport(config: TriviaConfig, transport: Arc<dyn TriviaTransport>) -> Self {
        let cooldown = Cooldown::new(config.cooldown);
        Self {
            config,
            transport,
            clock: Clock::default_clock(),
            cooldown: Mutex::new(cooldown),
            state: Mutex::new(ClientState { token: None }),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub async fn cached_token(&self) -> Option<String> {
        self.state.lock().await.token.clone()
    }

    /// Ask the API to reset the cached token. No-op without a cached token.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::ResetFailed` when the API rejects the reset.
    pub async fn reset_token(&self) -> Result<(), TriviaError> {
        let mut state = self.state.lock().await;
        let mut budget = self.budget();
        self.reset_token_locked(&mut state, &mut budget).await
    }

    /// Fetch questions matching `query`.
    ///
    /// Response code 4 resets the token and retries once. HTTP 429 and
    /// response code 5 back off exponentially. Both draw from the same
    /// per-call retry budget.
    ///
    /// # Errors
    ///
    /// - `TooManyRequests` when called inside the cooldown window.
    /// - `RetriesExhausted` when the retry budget runs out.
    /// - `Token`, `Api`, `EmptyResult`, `Transport` or `Decode` otherwise.
    pub async fn fetch_questions(&self, query: &QuestionQuery) -> Result<Vec<Question>, TriviaError> {
        if let Err(retry_after) = self.cooldown.lock().await.try_acquire(&self.clock) {
            warn!(?retry_after, "question fetch rejected by cooldown");
            return Err(TriviaError::TooManyRequests { retry_after });
        }

        let mut state = self.state.lock().await;

        let mut budget = self.budget();
        let mut token_reset = false;
        loop {
            let token = self.ensure_token(&mut state, &mut budget).await?;
            let params = question_params(query, &token);
            let body = self
                .get_with_backoff(&mut budget, &self.config.api_url, &params)
                .await?;
            let response: QuestionsResponse = serde_json::from_str(&body)?;
            let code = ResponseCode::from(response.response_code);
            debug!(%code, results = response.results.len(), "question response");

            match code {
                ResponseCode::Success => {
                    if response.results.is_empty() {
                        return Err(TriviaError::EmptyResult);
                    }
                    info!(count = response.results.len(), "fetched questions");
                    return Ok(response.results);
                }
                ResponseCode::TokenExhausted if !token_reset => {
                    if !budget.take_immediate() {
                        return Err(TriviaError::RetriesExhausted {
                            attempts: budget.attempts(),
                        });
                    }
                    token_reset = true;
                    info!("session token exhausted, resetting");
                    self.reset_token_locked(&mut state, &mut budget).await?;
                }
                ResponseCode::TokenExhausted => return Err(TokenError::Exhausted.into()),
                ResponseCode::RateLimited => {
                    let Some(delay) = budget.next_delay() else {
                        return Err(TriviaError::RetriesExhausted {
                            attempts: budget.attempts(),
                        });
                    };
                    warn!(?delay, attempt = budget.attempts(), "rate limited by response code");
                    tokio::time::sleep(delay).await;
                }
                ResponseCode::TokenNotFound => {
                    state.token = None;
                    return Err(TokenError::NotFound.into());
                }
                other => return Err(TriviaError::Api(other)),
            }
        }
    }

    /// List upstream categories. Not subject to the question cooldown.
    ///
    /// # Errors
    ///
    /// Returns transport, backoff or decode errors.
    pub async fn fetch_categories(&self) -> Result<Vec<Category>, TriviaError> {
        let mut budget = self.budget();
        let body = self
            .get_with_backoff(&mut budget, &self.config.category_url, &[])
            .await?;
        let response: CategoriesResponse = serde_json::from_str(&body)?;
        debug!(count = response.trivia_categories.len(), "fetched categories");
        Ok(response.trivia_categories)
    }

    fn budget(&self) -> RetryBudget {
        RetryBudget::new(self.config.max_retries, self.config.base_delay)
    }

    async fn ensure_token(
        &self,
        state: &mut ClientState,
        budget: &mut RetryBudget,
    ) -> Result<String, TriviaError> {
        if let Some(token) = &state.token {
            return Ok(token.clone());
        }
        let token = self.request_token_locked(budget).await?;
        state.token = Some(token.clone());
        Ok(token)
    }

    async fn request_token_locked(&self, budget: &mut RetryBudget) -> Result<String, TriviaError> {
        let params = [("command", "request".to_string())];
        let body = self
            .get_with_backoff(budget, &self.config.token_url, &params)
            .await?;
        let response: TokenResponse = serde_json::from_str(&body)?;
        let code = ResponseCode::from(response.response_code);
        match response.token {
            Some(token) if code.is_success() && !token.is_empty() => {
                info!("obtained session token");
                Ok(token)
            }
            _ => {
                warn!(%code, message = %response.response_message, "token request refused");
                Err(TokenError::Unavailable { code }.into())
            }
        }
    }

    async fn reset_token_locked(
        &self,
        state: &mut ClientState,
        budget: &mut RetryBudget,
    ) -> Result<(), TriviaError> {
        let Some(token) = state.token.clone() else {
            return Ok(());
        };
        let params = [("command", "reset".to_string()), ("token", token)];
        let body = self
            .get_with_backoff(budget, &self.config.token_url, &params)
            .await?;
        let response: TokenResponse = serde_json::from_str(&body)?;
        let code = ResponseCode::from(response.response_code);
        if !code.is_success() {
            warn!(%code, message = %response.response_message, "token reset refused");
            state.token = None;
            return Err(TokenError::ResetFailed { code }.into());
        }
        if let Some(fresh) = response.token.filter(|t| !t.is_empty()) {
            state.token = Some(fresh);
        }
        debug!("session token reset");
        Ok(())
    }

    async fn get_with_backoff(
        &self,
        budget: &mut RetryBudget,
        url: &str,
        params: &[(&'static str, String)],
    ) -> Result<String, TriviaError> {
        loop {
            let response = self.transport.get(url, params).await?;
            if response.status == StatusCode::TOO_MANY_REQUESTS {
                let Some(delay) = budget.next_delay() else {
                    warn!(url, attempts = budget.attempts(), "giving up after HTTP 429");
                    return Err(TriviaError::RetriesExhausted {
                        attempts: budget.attempts(),
                    });
                };
                warn!(url, ?delay, "HTTP 429, backing off");
                tokio::time::sleep(delay).await;
                continue;
            }
            if !response.status.is_success() {
                return Err(TransportError::Status(response.status).into());
            }
            return Ok(response.body);
        }
    }
}

impl fmt::Debug for TriviaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriviaClient")
            .field("config", &self.config)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

fn question_params(query: &QuestionQuery, token: &str) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("amount", query.amount().to_string()),
        ("token", token.to_string()),
        ("encode", "url3986".to_string()),
    ];
    if let Some(difficulty) = query.difficulty() {
        params.push(("difficulty", difficulty.as_str().to_string()));
    }
    if let Some(kind) = query.kind() {
        params.push(("type", kind.as_str().to_string()));
    }
    if let Some(category) = query.category() {
        params.push(("category", category.to_string()));
    }
    params
}
