//! Retry policy for transient request failures.

use std::time::Duration;

/// How many times, and how patiently, a failed page request is retried.
///
/// Rate limiting (429), server errors (5xx) and network failures are retried.
/// The wait starts at `initial_delay` and doubles per attempt. Every wait,
/// including one asked for by a `Retry-After` header, is capped at `max_delay`.
///
/// ```
/// use std::time::Duration;
/// use artic_lib::retry::RetryConfig;
///
/// let patient = RetryConfig::default().max_retries(5);
/// assert_eq!(patient.max_retries, 5);
/// assert_eq!(RetryConfig::no_retry().max_retries, 0);
/// ```
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
        }
    }
}

impl RetryConfig {
    /// Fails on the first error.
    pub fn no_retry() -> Self {
        Self::default().max_retries(0)
    }

    pub fn max_retries(mut self, n: u32) -> Self {
        self.max_retries = n;
        self
    }

    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Wait after one of `delay`: doubled, capped at `max_delay`.
    pub(crate) fn next_delay(&self, delay: Duration) -> Duration {
        (delay * 2).min(self.max_delay)
    }

    /// Wait for a 429: the server's `Retry-After` if sent, else `fallback`, capped.
    pub(crate) fn rate_limit_wait(&self, retry_after: Option<Duration>, fallback: Duration) -> Duration {
        retry_after.unwrap_or(fallback).min(self.max_delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_and_caps() {
        let config = RetryConfig::default()
            .initial_delay(Duration::from_secs(1))
            .max_delay(Duration::from_secs(3));

        let second = config.next_delay(config.initial_delay);
        assert_eq!(second, Duration::from_secs(2));
        assert_eq!(config.next_delay(second), Duration::from_secs(3));
    }

    #[test]
    fn test_retry_after_is_capped() {
        let config = RetryConfig::default().max_delay(Duration::from_secs(8));

        let huge = Some(Duration::from_secs(3600));
        assert_eq!(config.rate_limit_wait(huge, Duration::from_secs(1)), Duration::from_secs(8));
        assert_eq!(
            config.rate_limit_wait(Some(Duration::from_secs(2)), Duration::from_secs(1)),
            Duration::from_secs(2)
        );
        assert_eq!(config.rate_limit_wait(None, Duration::from_millis(500)), Duration::from_millis(500));
    }
}
