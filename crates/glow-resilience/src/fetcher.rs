// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resilient upstream fetch: breaker gate, per-attempt timeout, and
//! exponential-backoff retries around a single-attempt transport.

use std::sync::Arc;
use std::time::Duration;

use glow_config::GlowConfig;
use glow_core::{AttemptError, FetchError, UpstreamTransport};
use tracing::{debug, warn};

use crate::backoff::BackoffPolicy;
use crate::breaker::CircuitBreaker;

/// Fetches raw JSON from the upstream catalog with retry, timeout, and
/// circuit breaking.
///
/// Failure handling per attempt:
/// - timeout: counted against the breaker, surfaced immediately;
/// - unreachable: counted against the breaker, surfaced immediately;
/// - non-2xx status or other transport error: retried with backoff, counted
///   once against the breaker when the retry budget runs out.
///
/// Any successful response clears the breaker.
pub struct ResilientFetcher {
    transport: Arc<dyn UpstreamTransport>,
    breaker: Arc<CircuitBreaker>,
    backoff: BackoffPolicy,
    timeout: Duration,
}

impl ResilientFetcher {
    pub fn new(
        transport: Arc<dyn UpstreamTransport>,
        breaker: Arc<CircuitBreaker>,
        backoff: BackoffPolicy,
        timeout: Duration,
    ) -> Self {
        Self {
            transport,
            breaker,
            backoff,
            timeout,
        }
    }

    /// Build a fetcher with a fresh breaker from the resilience and upstream
    /// sections of `config`.
    pub fn from_config(transport: Arc<dyn UpstreamTransport>, config: &GlowConfig) -> Self {
        Self::new(
            transport,
            Arc::new(CircuitBreaker::from_config(&config.resilience)),
            BackoffPolicy::from(&config.resilience),
            config.upstream.timeout(),
        )
    }

    pub fn breaker(&self) -> &Arc<CircuitBreaker> {
        &self.breaker
    }

    /// Fetch `url` and parse the body as JSON.
    ///
    /// A body that is not valid JSON yields [`FetchError::InvalidFormat`]; the
    /// transport itself succeeded, so the breaker is left as it was after the
    /// successful attempt.
    pub async fn fetch(&self, url: &str) -> Result<serde_json::Value, FetchError> {
        let body = self.fetch_body(url).await?;
        serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "upstream returned malformed JSON");
            FetchError::InvalidFormat(e.to_string())
        })
    }

    /// Fetch `url` and return the raw body.
    pub async fn fetch_body(&self, url: &str) -> Result<String, FetchError> {
        let mut retries = 0u32;
        loop {
            self.breaker.check()?;

            let outcome = match tokio::time::timeout(self.timeout, self.transport.get(url)).await {
                Ok(result) => result,
                Err(_elapsed) => Err(AttemptError::Timeout),
            };

            let err = match outcome {
                Ok(body) => {
                    self.breaker.record_success();
                    record_outcome("success");
                    debug!(url, retries, bytes = body.len(), "upstream fetch succeeded");
                    return Ok(body);
                }
                Err(err) => err,
            };

            match err {
                AttemptError::Timeout => {
                    self.breaker.record_failure();
                    record_outcome("timeout");
                    warn!(
                        url,
                        timeout_secs = self.timeout.as_secs_f64(),
                        "upstream request timed out"
                    );
                    return Err(FetchError::Timeout {
                        duration: self.timeout,
                    });
                }
                AttemptError::Unreachable(message) => {
                    self.breaker.record_failure();
                    record_outcome("unreachable");
                    warn!(url, %message, "upstream unreachable, not retrying");
                    return Err(FetchError::NetworkUnreachable { message });
                }
                recoverable @ (AttemptError::Status(_) | AttemptError::Other(_)) => {
                    if !self.backoff.allows_retry(retries) {
                        self.breaker.record_failure();
                        record_outcome("exhausted");
                        warn!(url, retries, error = %recoverable, "upstream retries exhausted");
                        return Err(FetchError::FetchExhausted {
                            retries,
                            last_error: recoverable.to_string(),
                        });
                    }

                    let delay = self.backoff.delay_for(retries);
                    retries += 1;
                    metrics::counter!("glow_upstream_retries_total").increment(1);
                    debug!(
                        url,
                        retry = retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %recoverable,
                        "retrying upstream fetch"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

fn record_outcome(outcome: &'static str) {
    metrics::counter!("glow_upstream_requests_total", "outcome" => outcome).increment(1);
}
