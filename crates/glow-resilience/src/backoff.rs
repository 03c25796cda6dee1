// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exponential backoff between retry attempts.

use std::time::Duration;

use glow_config::model::ResilienceConfig;

/// Retry budget and delay schedule for recoverable upstream errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each subsequent retry.
    pub initial_delay: Duration,
}

impl BackoffPolicy {
    pub fn new(max_retries: u32, initial_delay: Duration) -> Self {
        Self {
            max_retries,
            initial_delay,
        }
    }

    /// A policy that never retries.
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Delay before retry number `retry` (0-indexed): `initial × 2^retry`.
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry);
        self.initial_delay.saturating_mul(factor)
    }

    /// Whether another retry is allowed after `retries_done` retries.
    pub fn allows_retry(&self, retries_done: u32) -> bool {
        retries_done < self.max_retries
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

impl From<&ResilienceConfig> for BackoffPolicy {
    fn from(config: &ResilienceConfig) -> Self {
        Self::new(config.max_retries, config.initial_backoff())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_is_one_two_four_seconds() {
        let policy = BackoffPolicy::default();
        let delays: Vec<_> = (0..policy.max_retries).map(|n| policy.delay_for(n)).collect();
        assert_eq!(
            delays,
            vec![
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(4)
            ]
        );
    }

    #[test]
    fn retry_budget() {
        let policy = BackoffPolicy::new(2, Duration::from_millis(10));
        assert!(policy.allows_retry(0));
        assert!(policy.allows_retry(1));
        assert!(!policy.allows_retry(2));
        assert!(!BackoffPolicy::none().allows_retry(0));
    }

    #[test]
    fn huge_retry_index_saturates() {
        let policy = BackoffPolicy::new(100, Duration::from_secs(1));
        assert_eq!(policy.delay_for(64), Duration::from_secs(u32::MAX as u64));
    }

    #[test]
    fn built_from_config() {
        let config = ResilienceConfig {
            max_retries: 1,
            initial_backoff_ms: 50,
            ..Default::default()
        };
        let policy = BackoffPolicy::from(&config);
        assert_eq!(policy.max_retries, 1);
        assert_eq!(policy.initial_delay, Duration::from_millis(50));
    }
}
