//! Exponential backoff for the one transient failure Google APIs are known to
//! produce: a freshly issued page token that the server does not accept yet
//! and reports as `INVALID_REQUEST`.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::config::{env_parse, process_env};
use crate::error::GoogleCoreError;
use crate::status::ErrorKind;

pub const DEFAULT_MAX_ATTEMPTS: usize = 5;
pub const DEFAULT_BASE_WAIT_MS: u64 = 333;
pub const DEFAULT_MAX_WAIT_MS: u64 = 2000;

/// Backoff schedule applied to invalid-request failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub base_wait: Duration,
    pub max_wait: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_wait: Duration::from_millis(DEFAULT_BASE_WAIT_MS),
            max_wait: Duration::from_millis(DEFAULT_MAX_WAIT_MS),
        }
    }
}

impl RetryPolicy {
    /// Reads `GOOGLECORE_RETRY_MAX`, `GOOGLECORE_RETRY_BASE_MS` and
    /// `GOOGLECORE_RETRY_MAX_MS`, falling back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(&process_env)
    }

    pub(crate) fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Self {
        Self {
            max_attempts: env_parse(lookup, "GOOGLECORE_RETRY_MAX", DEFAULT_MAX_ATTEMPTS).max(1),
            base_wait: Duration::from_millis(env_parse(
                lookup,
                "GOOGLECORE_RETRY_BASE_MS",
                DEFAULT_BASE_WAIT_MS,
            )),
            max_wait: Duration::from_millis(env_parse(
                lookup,
                "GOOGLECORE_RETRY_MAX_MS",
                DEFAULT_MAX_WAIT_MS,
            )),
        }
    }

    /// Wait after the failed attempt `attempt` (0-indexed):
    /// `min(base_wait * 2^attempt, max_wait)`.
    pub fn delay_for_attempt(&self, attempt: usize) -> Duration {
        let shift = attempt.min(30) as u32;
        let base_ms = self.base_wait.as_millis() as u64;
        let max_ms = self.max_wait.as_millis() as u64;
        Duration::from_millis(base_ms.saturating_mul(1u64 << shift).min(max_ms))
    }

    /// Runs `call` until it succeeds, fails with something other than an
    /// invalid request, or `max_attempts` is used up.
    ///
    /// Each invalid-request failure is followed by a backoff sleep, after
    /// which the call is retried; once attempts run out the last error is
    /// returned. Cancelling `cancel` during a sleep ends the loop with
    /// [`GoogleCoreError::Cancelled`].
    pub async fn run<T, F, Fut>(
        &self,
        mut call: F,
        cancel: &CancellationToken,
    ) -> Result<T, GoogleCoreError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, GoogleCoreError>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut last_err = None;

        for attempt in 0..max_attempts {
            if cancel.is_cancelled() {
                return Err(GoogleCoreError::Cancelled);
            }
            match call().await {
                Ok(value) => return Ok(value),
                Err(err) if err.kind() == Some(ErrorKind::InvalidRequest) => {
                    let delay = self.delay_for_attempt(attempt);
                    tracing::warn!(
                        "invalid request (attempt {}/{}), retrying in {:.3}s",
                        attempt + 1,
                        max_attempts,
                        delay.as_secs_f64()
                    );
                    last_err = Some(err);
                    tokio::select! {
                        _ = cancel.cancelled() => return Err(GoogleCoreError::Cancelled),
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
                Err(err) => return Err(err),
            }
        }

        Err(last_err.unwrap_or(GoogleCoreError::Cancelled))
    }
}

/// Retries `call` on invalid-request errors with the default policy.
pub async fn exponential_retry<T, F, Fut>(call: F) -> Result<T, GoogleCoreError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GoogleCoreError>>,
{
    RetryPolicy::default()
        .run(call, &CancellationToken::new())
        .await
}
