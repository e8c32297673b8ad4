// SPDX-FileCopyrightText: 2026 Memosync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service trait for the memo backend.

use async_trait::async_trait;

use crate::error::MemoError;
use crate::token::AccessToken;
use crate::types::{Category, CategoryId, Memo, MemoDetail, MemoId, MemoPayload};

/// Typed operations offered by the memo backend.
///
/// Every operation requires a token and performs exactly one request; no
/// retries happen at this layer. The HTTP client and the in-memory test
/// backend both implement this trait.
#[async_trait]
pub trait MemoApi: Send + Sync + 'static {
    /// Lists every category visible to the token.
    async fn list_categories(&self, token: &AccessToken) -> Result<Vec<Category>, MemoError>;

    /// Lists the memos belonging to `category_id`.
    async fn list_memos(
        &self,
        token: &AccessToken,
        category_id: CategoryId,
    ) -> Result<Vec<Memo>, MemoError>;

    /// Fetches a single memo with its content and owning category.
    async fn get_memo(&self, token: &AccessToken, memo_id: MemoId) -> Result<MemoDetail, MemoError>;

    /// Creates a memo and returns the server's canonical copy.
    async fn create_memo(
        &self,
        token: &AccessToken,
        payload: &MemoPayload,
    ) -> Result<MemoDetail, MemoError>;

    /// Replaces a memo's fields. `payload.category_id` must be resent even
    /// when the category does not change.
    async fn update_memo(
        &self,
        token: &AccessToken,
        memo_id: MemoId,
        payload: &MemoPayload,
    ) -> Result<MemoDetail, MemoError>;

    /// Deletes a memo.
    async fn delete_memo(&self, token: &AccessToken, memo_id: MemoId) -> Result<(), MemoError>;
}
