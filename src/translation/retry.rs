//! Backoff schedule for transient provider failures.

use rand::Rng;
use std::time::Duration;

use crate::app_config::TranslationCommonConfig;
use crate::errors::ProviderError;

/// Longest wait between two attempts, whatever the attempt number
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Bounded exponential backoff with jitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry, doubled on each following one
    pub base_delay: Duration,
    /// Upper bound for a single delay
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Create a policy from retry count and base delay
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_delay: MAX_BACKOFF,
        }
    }

    /// Policy that never retries
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Policy from the `retry_count` and `retry_backoff_ms` settings
    pub fn from_config(common: &TranslationCommonConfig) -> Self {
        Self::new(common.retry_count, Duration::from_millis(common.retry_backoff_ms))
    }

    /// Delay before retrying after `error` on the zero-based `attempt`.
    ///
    /// Returns `None` when the error is permanent or retries are exhausted.
    pub fn next_delay(&self, error: &ProviderError, attempt: u32) -> Option<Duration> {
        if !error.is_transient() || attempt >= self.max_retries {
            return None;
        }

        let exponential = self.base_delay.saturating_mul(1u32 << attempt.min(16));
        let jitter_ms = match self.base_delay.as_millis() as u64 / 2 {
            0 => 0,
            half => rand::rng().random_range(0..=half),
        };
        let mut delay = exponential
            .saturating_add(Duration::from_millis(jitter_ms))
            .min(self.max_delay);

        if let ProviderError::RateLimitExceeded { retry_after_secs: Some(secs), .. } = error {
            delay = delay.max(Duration::from_secs(*secs));
        }

        Some(delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&TranslationCommonConfig::default())
    }
}
