// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Consecutive-failure circuit breaker for the upstream catalog.
//!
//! The breaker opens once the recorded failure count reaches the threshold
//! and stays open until the reset window has elapsed since the most recent
//! failure. The first check after that clears the count and lets the call
//! through; a success at any time clears it as well.
//!
//! State sits behind a mutex so one breaker can be shared by every task on a
//! multi-threaded runtime. Time comes from [`tokio::time::Instant`], which
//! tests can pause and advance.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use glow_config::model::ResilienceConfig;
use glow_core::{CircuitState, FetchError};
use serde_json::json;
use tokio::time::Instant;
use tracing::{info, warn};

#[derive(Debug, Default)]
struct BreakerState {
    failures: u32,
    last_failure: Option<Instant>,
}

/// Point-in-time view of a breaker, for health reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakerSnapshot {
    pub state: CircuitState,
    pub failures: u32,
    pub threshold: u32,
    /// Time since the last recorded failure, if any.
    pub since_last_failure: Option<Duration>,
}

impl BreakerSnapshot {
    /// JSON form used by the health endpoint.
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "state": self.state,
            "failures": self.failures,
            "threshold": self.threshold,
            "secondsSinceLastFailure": self.since_last_failure.map(|d| d.as_secs()),
        })
    }
}

/// Shared failure counter that short-circuits calls after repeated failures.
#[derive(Debug)]
pub struct CircuitBreaker {
    threshold: u32,
    reset_timeout: Duration,
    state: Mutex<BreakerState>,
}

impl CircuitBreaker {
    /// Create a closed breaker. A zero threshold is treated as one.
    pub fn new(threshold: u32, reset_timeout: Duration) -> Self {
        Self {
            threshold: threshold.max(1),
            reset_timeout,
            state: Mutex::new(BreakerState::default()),
        }
    }

    pub fn from_config(config: &ResilienceConfig) -> Self {
        Self::new(config.failure_threshold, config.reset_timeout())
    }

    fn lock(&self) -> MutexGuard<'_, BreakerState> {
        // A panic while holding this lock cannot leave the two counters
        // inconsistent, so poisoning is ignored.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Gate a call: `Err(CircuitOpen)` while open, `Ok` otherwise.
    ///
    /// Clears the failure count once the reset window has elapsed.
    pub fn check(&self) -> Result<(), FetchError> {
        let mut state = self.lock();
        if state.failures < self.threshold {
            return Ok(());
        }

        let elapsed = state
            .last_failure
            .map(|at| at.elapsed())
            .unwrap_or(self.reset_timeout);
        if elapsed < self.reset_timeout {
            metrics::counter!("glow_circuit_rejections_total").increment(1);
            return Err(FetchError::CircuitOpen {
                failures: state.failures,
                retry_after: self.reset_timeout - elapsed,
            });
        }

        info!(
            failures = state.failures,
            elapsed_secs = elapsed.as_secs(),
            "circuit reset window elapsed, closing circuit"
        );
        state.failures = 0;
        Ok(())
    }

    /// Record a successful upstream response.
    pub fn record_success(&self) {
        let mut state = self.lock();
        if state.failures > 0 {
            info!(previous_failures = state.failures, "upstream recovered, failure count reset");
        }
        state.failures = 0;
    }

    /// Record a failed upstream call. Returns the new failure count.
    pub fn record_failure(&self) -> u32 {
        let mut state = self.lock();
        state.failures = state.failures.saturating_add(1);
        state.last_failure = Some(Instant::now());
        if state.failures == self.threshold {
            metrics::counter!("glow_circuit_open_total").increment(1);
            warn!(
                failures = state.failures,
                reset_secs = self.reset_timeout.as_secs(),
                "circuit breaker opened"
            );
        }
        state.failures
    }

    /// Current failure count.
    pub fn failures(&self) -> u32 {
        self.lock().failures
    }

    /// Whether a call made now would be rejected. Does not mutate state.
    pub fn is_open(&self) -> bool {
        let state = self.lock();
        state.failures >= self.threshold
            && state
                .last_failure
                .is_some_and(|at| at.elapsed() < self.reset_timeout)
    }

    pub fn snapshot(&self) -> BreakerSnapshot {
        let open = self.is_open();
        let state = self.lock();
        BreakerSnapshot {
            state: if open {
                CircuitState::Open
            } else {
                CircuitState::Closed
            },
            failures: state.failures,
            threshold: self.threshold,
            since_last_failure: state.last_failure.map(|at| at.elapsed()),
        }
    }
}
