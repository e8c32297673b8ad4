// SPDX-FileCopyrightText: 2026 Memosync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the memo backend.
//!
//! [`MemoClient`] implements [`MemoApi`] by routing each operation through
//! the endpoint functions in [`services`], which share one
//! [`HttpTransport`].

pub mod services;
pub mod transport;

use async_trait::async_trait;
use memosync_config::model::ApiConfig;
use memosync_core::{
    AccessToken, Category, CategoryId, Memo, MemoApi, MemoDetail, MemoError, MemoId, MemoPayload,
};
use tracing::info;

pub use transport::{HttpTransport, RequestOptions, ACCESS_TOKEN_HEADER};

/// Memo backend client implementing [`MemoApi`].
#[derive(Debug, Clone)]
pub struct MemoClient {
    transport: HttpTransport,
}

impl MemoClient {
    /// Creates a client from the `[api]` configuration section.
    pub fn new(config: &ApiConfig) -> Result<Self, MemoError> {
        let transport = HttpTransport::new(config)?;
        info!(base_url = transport.base_url(), "memo client initialized");
        Ok(Self { transport })
    }

    /// Wraps an existing transport.
    pub fn with_transport(transport: HttpTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl MemoApi for MemoClient {
    async fn list_categories(&self, token: &AccessToken) -> Result<Vec<Category>, MemoError> {
        services::category::list_categories(&self.transport, token).await
    }

    async fn list_memos(
        &self,
        token: &AccessToken,
        category_id: CategoryId,
    ) -> Result<Vec<Memo>, MemoError> {
        services::memo::list_memos(&self.transport, token, category_id).await
    }

    async fn get_memo(&self, token: &AccessToken, memo_id: MemoId) -> Result<MemoDetail, MemoError> {
        services::memo::get_memo(&self.transport, token, memo_id).await
    }

    async fn create_memo(
        &self,
        token: &AccessToken,
        payload: &MemoPayload,
    ) -> Result<MemoDetail, MemoError> {
        services::memo::create_memo(&self.transport, token, payload).await
    }

    async fn update_memo(
        &self,
        token: &AccessToken,
        memo_id: MemoId,
        payload: &MemoPayload,
    ) -> Result<MemoDetail, MemoError> {
        services::memo::update_memo(&self.transport, token, memo_id, payload).await
    }

    async fn delete_memo(&self, token: &AccessToken, memo_id: MemoId) -> Result<(), MemoError> {
        services::memo::delete_memo(&self.transport, token, memo_id).await
    }
}
