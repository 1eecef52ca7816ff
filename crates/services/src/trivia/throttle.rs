use std::time::Duration;

use chrono::{DateTime, Utc};
use trivia_core::Clock;

/// Per-call retry allowance shared by every request the call makes.
#[derive(Debug, Clone)]
pub(crate) struct RetryBudget {
    max_retries: u32,
    base_delay: Duration,
    used: u32,
}

impl RetryBudget {
    pub(crate) fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            used: 0,
        }
    }

    /// Consume one retry and return how long to wait before it.
    ///
    /// `None` once the ceiling is reached.
    pub(crate) fn next_delay(&mut self) -> Option<Duration> {
        if self.used >= self.max_retries {
            return None;
        }
        let delay = backoff_delay(self.base_delay, self.used);
        self.used += 1;
        Some(delay)
    }

    /// Consume one retry that does not wait.
    pub(crate) fn take_immediate(&mut self) -> bool {
        if self.used >= self.max_retries {
            return false;
        }
        self.used += 1;
        true
    }

    /// Requests issued so far, counting the initial one.
    pub(crate) fn attempts(&self) -> u32 {
        self.used + 1
    }
}

/// `base * 2^attempt`, saturating.
#[must_use]
pub fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2_u32.saturating_pow(attempt))
}

/// Minimum spacing between successive calls.
#[derive(Debug, Clone)]
pub(crate) struct Cooldown {
    window: Duration,
    last_call: Option<DateTime<Utc>>,
}

impl Cooldown {
    pub(crate) fn new(window: Duration) -> Self {
        Self {
            window,
            last_call: None,
        }
    }

    /// Record a call at `clock.now()`, or report the remaining wait.
    pub(crate) fn try_acquire(&mut self, clock: &Clock) -> Result<(), Duration> {
        if let Some(last) = self.last_call {
            let elapsed = clock.elapsed_since(last);
            if elapsed < self.window {
                return Err(self.window - elapsed);
            }
        }
        self.last_call = Some(clock.now());
        Ok(())
    }
}
