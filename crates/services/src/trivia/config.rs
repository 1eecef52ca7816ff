use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use tracing::{info, warn};
use url::Url;

use crate::error::TriviaError;

pub const DEFAULT_API_URL: &str = "https://opentdb.com/api.php";
pub const DEFAULT_TOKEN_URL: &str = "https://opentdb.com/api_token.php";
pub const DEFAULT_CATEGORY_URL: &str = "https://opentdb.com/api_category.php";

const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_BACKOFF: Duration = Duration::from_secs(1);
// Upstream allows one request per IP every 5 seconds.
const DEFAULT_COOLDOWN: Duration = Duration::from_secs(5);
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Endpoints and throttling knobs for the live trivia client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriviaConfig {
    pub api_url: String,
    pub token_url: String,
    pub category_url: String,
    /// Retries allowed per call after the first attempt.
    pub max_retries: u32,
    /// First backoff delay; doubles on every further retry.
    pub base_delay: Duration,
    /// Minimum spacing between question fetches.
    pub cooldown: Duration,
    pub request_timeout: Duration,
}

impl Default for TriviaConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            token_url: DEFAULT_TOKEN_URL.into(),
            category_url: DEFAULT_CATEGORY_URL.into(),
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_BACKOFF,
            cooldown: DEFAULT_COOLDOWN,
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl TriviaConfig {
    /// Read overrides from `TRIVIA_*` environment variables.
    ///
    /// Unset variables keep their defaults; malformed ones are logged and ignored.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: load_url("TRIVIA_API_URL", defaults.api_url),
            token_url: load_url("TRIVIA_TOKEN_URL", defaults.token_url),
            category_url: load_url("TRIVIA_CATEGORY_URL", defaults.category_url),
            max_retries: load("TRIVIA_MAX_RETRIES", defaults.max_retries),
            base_delay: load_millis("TRIVIA_BACKOFF_MS", defaults.base_delay),
            cooldown: load_millis("TRIVIA_COOLDOWN_MS", defaults.cooldown),
            request_timeout: defaults.request_timeout,
        }
    }

    /// Settings for tests: no backoff sleeps and no cooldown.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            base_delay: Duration::ZERO,
            cooldown: Duration::ZERO,
            ..Self::default()
        }
    }

    /// # Errors
    ///
    /// Returns `TriviaError::InvalidEndpoint` if any endpoint is not an absolute URL.
    pub fn validate(&self) -> Result<(), TriviaError> {
        for raw in [&self.api_url, &self.token_url, &self.category_url] {
            Url::parse(raw)?;
        }
        Ok(())
    }
}

fn load<T: FromStr + Display>(key: &str, default: T) -> T
where
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|err| {
            warn!("Invalid {key} value {raw:?}: {err}, using default {default}");
            default
        }),
        Err(_) => default,
    }
}

fn load_millis(key: &str, default: Duration) -> Duration {
    let millis = u64::try_from(default.as_millis()).unwrap_or(u64::MAX);
    Duration::from_millis(load(key, millis))
}

fn load_url(key: &str, default: String) -> String {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    match Url::parse(raw.trim()) {
        Ok(url) => {
            info!("{key} overridden: {url}");
            url.into()
        }
        Err(err) => {
            warn!("Invalid {key} value {raw:?}: {err}, using default {default}");
            default
        }
    }
}
