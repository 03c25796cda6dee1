// SPDX-FileCopyrightText: 2026 Glow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Glow integration tests.
//!
//! # Components
//!
//! - [`ScriptedTransport`] - upstream transport that replays queued outcomes
//! - [`fixtures`] - raw upstream records and test configurations

pub mod fixtures;
pub mod mock_transport;

pub use mock_transport::{Scripted, ScriptedTransport};
