// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! reqwest-backed [`UpstreamTransport`].

use std::time::Duration;

use async_trait::async_trait;
use glow_config::model::UpstreamConfig;
use glow_core::{AttemptError, GlowError, UpstreamTransport};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use tracing::debug;

/// Single-attempt HTTP GET against the upstream catalog.
///
/// Classifies failures only; retries and circuit breaking live in
/// [`ResilientFetcher`](crate::ResilientFetcher).
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport with the configured user agent and timeout.
    pub fn new(config: &UpstreamConfig) -> Result<Self, GlowError> {
        Self::with_timeout(&config.user_agent, config.timeout())
    }

    pub fn with_timeout(user_agent: &str, timeout: Duration) -> Result<Self, GlowError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| GlowError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl UpstreamTransport for HttpTransport {
    async fn get(&self, url: &str) -> Result<String, AttemptError> {
        let response = self.client.get(url).send().await.map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            debug!(url, status = status.as_u16(), "upstream returned error status");
            return Err(AttemptError::Status(status.as_u16()));
        }

        response.text().await.map_err(classify)
    }
}

fn classify(err: reqwest::Error) -> AttemptError {
    if err.is_timeout() {
        AttemptError::Timeout
    } else if err.is_connect() {
        AttemptError::Unreachable(err.to_string())
    } else {
        AttemptError::Other(err.to_string())
    }
}
