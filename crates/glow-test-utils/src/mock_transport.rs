// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted upstream transport for deterministic resilience tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use glow_core::{AttemptError, UpstreamTransport};

/// One scripted outcome of a transport call.
#[derive(Debug, Clone)]
pub enum Scripted {
    /// Respond with this body.
    Body(String),
    /// Fail with this classified error.
    Fail(AttemptError),
    /// Respond with this body after a delay.
    Slow(Duration, String),
    /// Never complete; the caller's timeout has to fire.
    Hang,
}

/// A transport that pops outcomes from a FIFO queue and counts calls.
///
/// When the queue is empty the default outcome is returned; unless set with
/// [`ScriptedTransport::always`], that default is an `Other` failure.
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Scripted>>,
    default: Scripted,
    calls: AtomicUsize,
    urls: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::always(Scripted::Fail(AttemptError::Other(
            "script exhausted".to_string(),
        )))
    }

    /// A transport that answers every call with `outcome`.
    pub fn always(outcome: Scripted) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            default: outcome,
            calls: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
        }
    }

    /// Queue `outcome` for the next unscripted call (builder form).
    pub fn then(self, outcome: Scripted) -> Self {
        self.push(outcome);
        self
    }

    /// Queue `outcome` for the next unscripted call.
    pub fn push(&self, outcome: Scripted) {
        self.script
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push_back(outcome);
    }

    /// Number of `get` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// URLs requested so far, in call order.
    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    fn next_outcome(&self) -> Scripted {
        self.script
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .pop_front()
            .unwrap_or_else(|| self.default.clone())
    }
}

impl Default for ScriptedTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UpstreamTransport for ScriptedTransport {
    async fn get(&self, url: &str) -> Result<String, AttemptError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(url.to_string());

        match self.next_outcome() {
            Scripted::Body(body) => Ok(body),
            Scripted::Fail(err) => Err(err),
            Scripted::Slow(delay, body) => {
                tokio::time::sleep(delay).await;
                Ok(body)
            }
            Scripted::Hang => std::future::pending().await,
        }
    }
}
