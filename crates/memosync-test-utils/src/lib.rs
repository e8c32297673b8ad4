// SPDX-FileCopyrightText: 2026 Memosync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for memosync integration tests.
//!
//! Provides an in-memory memo backend and a harness builder for fast,
//! deterministic, CI-runnable tests without the real service.
//!
//! # Components
//!
//! - [`MockMemoApi`] - In-memory backend with call counters and failure injection
//! - [`TestHarness`] - Pre-seeded backend, session token and configuration

pub mod harness;
pub mod mock_api;

pub use harness::TestHarness;
pub use mock_api::{ApiCall, MockMemoApi};
