//! Per-request options and the retry policy they override.

use std::time::Duration;

use reqwest::Method;
use reqwest::header::{
    HeaderMap,
    HeaderName,
    HeaderValue,
};

use crate::config::HttpSettings;

/// Timeout and retry bounds applied to every attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub timeout: Duration,
    /// Attempts after the first one.
    pub retries: u32,
    pub retry_delay: Duration,
}

impl RetryPolicy {
    /// Linear backoff: wait `retry_delay * (attempt + 1)` after the 0-indexed `attempt`.
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.retry_delay.saturating_mul(attempt.saturating_add(1))
    }

    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }

    /// Fill unset fields of `options` from this policy.
    #[must_use]
    pub fn apply(&self, options: &RequestOptions) -> Self {
        Self {
            timeout: options.timeout.unwrap_or(self.timeout),
            retries: options.retries.unwrap_or(self.retries),
            retry_delay: options.retry_delay.unwrap_or(self.retry_delay),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&HttpSettings::default())
    }
}

impl From<&HttpSettings> for RetryPolicy {
    fn from(settings: &HttpSettings) -> Self {
        Self {
            timeout: settings.timeout(),
            retries: settings.retries,
            retry_delay: settings.retry_delay(),
        }
    }
}

/// Standard request options plus overrides of the client's [`RetryPolicy`].
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<String>,
    pub timeout: Option<Duration>,
    pub retries: Option<u32>,
    pub retry_delay: Option<Duration>,
}

impl RequestOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = Some(retries);
        self
    }

    #[must_use]
    pub fn retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = Some(retry_delay);
        self
    }
}
