// SPDX-FileCopyrightText: 2026 Memosync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions at the backend seam.
//!
//! Uses `#[async_trait]` so implementations can be held as `Arc<dyn MemoApi>`.

pub mod api;

pub use api::MemoApi;
