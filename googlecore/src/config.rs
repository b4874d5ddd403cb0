//! Client configuration, read from the environment where not given explicitly.

use std::fmt;
use std::str::FromStr;

use googlecore_api::DEFAULT_MAX_WORKERS;

use crate::error::GoogleCoreError;
use crate::retry::RetryPolicy;
use crate::status::StatusPolicy;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";
pub const STRICT_STATUS_ENV: &str = "GOOGLECORE_STRICT_STATUS";
pub const MAX_WORKERS_ENV: &str = "GOOGLECORE_MAX_WORKERS";

/// Everything a [`GoogleApiClient`](crate::GoogleApiClient) needs besides its
/// transport.
#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub status_policy: StatusPolicy,
    pub retry: RetryPolicy,
    pub max_workers: usize,
}

impl ClientConfig {
    /// Config with the given key and default policies.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            status_policy: StatusPolicy::default(),
            retry: RetryPolicy::default(),
            max_workers: DEFAULT_MAX_WORKERS,
        }
    }

    /// Reads `GOOGLE_API_KEY`, `GOOGLECORE_STRICT_STATUS`,
    /// `GOOGLECORE_MAX_WORKERS` and the retry variables.
    pub fn from_env() -> Result<Self, GoogleCoreError> {
        Self::from_lookup(process_env)
    }

    /// Like [`ClientConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, GoogleCoreError> {
        let api_key = lookup(API_KEY_ENV).unwrap_or_default();
        let config = Self::new(api_key).with_policies_from(&lookup);
        config.validate()?;
        Ok(config)
    }

    /// Keeps the key, replacing status, retry and worker settings with those
    /// found in the environment.
    pub fn with_env_policies(self) -> Self {
        self.with_policies_from(&process_env)
    }

    fn with_policies_from(mut self, lookup: &dyn Fn(&str) -> Option<String>) -> Self {
        self.status_policy = if env_bool(lookup, STRICT_STATUS_ENV) {
            StatusPolicy::Strict
        } else {
            StatusPolicy::Permissive
        };
        self.retry = RetryPolicy::from_lookup(lookup);
        self.max_workers = env_parse(lookup, MAX_WORKERS_ENV, DEFAULT_MAX_WORKERS);
        self
    }

    pub fn with_status_policy(mut self, policy: StatusPolicy) -> Self {
        self.status_policy = policy;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    pub fn validate(&self) -> Result<(), GoogleCoreError> {
        if self.api_key.trim().is_empty() {
            return Err(GoogleCoreError::Config(format!(
                "API key is empty (set {})",
                API_KEY_ENV
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("status_policy", &self.status_policy)
            .field("retry", &self.retry)
            .field("max_workers", &self.max_workers)
            .finish()
    }
}

pub(crate) fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

pub(crate) fn env_parse<T: FromStr>(
    lookup: &dyn Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    lookup(key)
        .and_then(|val| val.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn env_bool(lookup: &dyn Fn(&str) -> Option<String>, key: &str) -> bool {
    lookup(key)
        .map(|val| matches!(val.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}
