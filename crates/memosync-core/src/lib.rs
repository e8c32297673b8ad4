// SPDX-FileCopyrightText: 2026 Memosync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the memosync client.
//!
//! This crate provides the error taxonomy, the domain types exchanged with
//! the memo backend, access token validation, and the [`MemoApi`] trait that
//! the HTTP client and test backends implement.

pub mod error;
pub mod token;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::MemoError;
pub use token::{generate_access_token, is_valid_access_token, AccessToken};
pub use traits::MemoApi;
pub use types::{Category, CategoryId, Memo, MemoDetail, MemoField, MemoId, MemoPayload};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memo_api_is_object_safe() {
        fn _assert_dyn(_: &dyn MemoApi) {}
        fn _assert_arc(_: std::sync::Arc<dyn MemoApi>) {}
    }

    #[test]
    fn memo_error_has_all_variants() {
        let _network = MemoError::Network { message: "test".into() };
        let _http = MemoError::Http { status: 500, message: "test".into() };
        let _validation = MemoError::Validation("test".into());
        let _not_found = MemoError::NotFound("test".into());
        let _decode = MemoError::Decode { message: "test".into() };
        let _internal = MemoError::Internal("test".into());
    }

    #[test]
    fn ids_display_as_plain_numbers() {
        assert_eq!(CategoryId(3).to_string(), "3");
        assert_eq!(MemoId(42).to_string(), "42");
    }
}
