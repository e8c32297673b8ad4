// SPDX-FileCopyrightText: 2026 Memosync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request-keyed cache with stale-while-revalidate reads.
//!
//! [`QueryCache`] stores one slot per [`QueryKey`]-like key. Concurrent reads
//! of a key share a single in-flight request, invalidation marks a slot for
//! re-fetch without hiding the previous value, and every fetch carries a
//! generation so a slow superseded response can never overwrite a newer one.

pub mod entry;
pub mod key;
pub mod store;

pub use entry::CacheEntry;
pub use key::{Endpoint, QueryKey};
pub use store::{CacheOptions, QueryCache};
