// SPDX-FileCopyrightText: 2026 Memosync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed wrappers over [`HttpTransport`](crate::transport::HttpTransport),
//! one function per backend endpoint.

pub mod category;
pub mod memo;
