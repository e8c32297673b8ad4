// SPDX-FileCopyrightText: 2026 Memosync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The view of one cache slot handed to consumers.

use memosync_core::MemoError;

/// Current value of a key plus whether a fetch for it is outstanding.
///
/// A disabled key (no session) and a key that was never fetched both have
/// no value and are not loading: consumers render "no data", not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    pub value: Option<Result<V, MemoError>>,
    pub is_loading: bool,
}

impl<V> Default for CacheEntry<V> {
    fn default() -> Self {
        Self {
            value: None,
            is_loading: false,
        }
    }
}

impl<V> CacheEntry<V> {
    /// Entry for a key that has no identity to fetch with.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Entry holding a settled fetch result.
    pub fn resolved(result: Result<V, MemoError>) -> Self {
        Self {
            value: Some(result),
            is_loading: false,
        }
    }

    pub fn data(&self) -> Option<&V> {
        self.value.as_ref().and_then(|r| r.as_ref().ok())
    }

    pub fn error(&self) -> Option<&MemoError> {
        self.value.as_ref().and_then(|r| r.as_ref().err())
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// Converts the held value, keeping the loading flag.
    pub fn try_map<U>(self, f: impl FnOnce(V) -> Result<U, MemoError>) -> CacheEntry<U> {
        CacheEntry {
            value: self.value.map(|r| r.and_then(f)),
            is_loading: self.is_loading,
        }
    }
}
