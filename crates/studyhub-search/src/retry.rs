//! Bounded exponential backoff for rate-limited generation calls.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use studyhub_core::{defaults, Result};

/// Retry schedule: attempt `n` (0-based) that fails as rate limited sleeps
/// `base_delay * 2^n` before the next attempt. No jitter, no delay cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: defaults::RETRY_MAX_ATTEMPTS,
            base_delay: Duration::from_millis(defaults::RETRY_BASE_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Read `STUDYHUB_RETRY_MAX_ATTEMPTS` and `STUDYHUB_RETRY_BASE_DELAY_MS`.
    pub fn from_env() -> Self {
        Self::new(
            defaults::env_or("STUDYHUB_RETRY_MAX_ATTEMPTS", defaults::RETRY_MAX_ATTEMPTS),
            Duration::from_millis(defaults::env_or(
                "STUDYHUB_RETRY_BASE_DELAY_MS",
                defaults::RETRY_BASE_DELAY_MS,
            )),
        )
    }

    /// Delay after failed attempt `n`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Run `operation` until it succeeds, fails with a non-rate-limit error,
    /// or `max_attempts` calls have been made.
    pub async fn run<T, F, Fut>(&self, label: &str, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt: u32 = 0;
        loop {
            match operation().await {
                Ok(value) => {
                    if attempt > 0 {
                        debug!(op = label, attempt, "Succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(e) if e.is_rate_limited() && attempt + 1 < self.max_attempts => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        op = label,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Rate limited, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
