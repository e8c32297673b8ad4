// SPDX-FileCopyrightText: 2026 Memosync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory memo backend for deterministic testing.
//!
//! `MockMemoApi` implements `MemoApi` against a small in-process store so
//! cache, controller and end-to-end tests can count requests and inject
//! failures without a network.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use strum::Display;
use tokio::sync::Mutex;
use tracing::debug;

use memosync_core::{
    AccessToken, Category, CategoryId, Memo, MemoApi, MemoDetail, MemoError, MemoId, MemoPayload,
};

/// One backend operation, used to count calls and target injected failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ApiCall {
    ListCategories,
    ListMemos,
    GetMemo,
    CreateMemo,
    UpdateMemo,
    DeleteMemo,
}

struct State {
    categories: Vec<Category>,
    memos: BTreeMap<MemoId, MemoDetail>,
    next_id: i64,
    calls: HashMap<ApiCall, usize>,
    failures: HashMap<ApiCall, VecDeque<MemoError>>,
    delay: Option<Duration>,
}

/// A mock backend holding categories and memos in memory.
///
/// Cheap to clone; clones share the same store.
#[derive(Clone)]
pub struct MockMemoApi {
    state: Arc<Mutex<State>>,
}

/// Categories every fresh mock starts with.
pub fn default_categories() -> Vec<Category> {
    [(1, "Personal"), (2, "Work"), (3, "Ideas"), (7, "Archive")]
        .into_iter()
        .map(|(id, name)| Category {
            id: CategoryId(id),
            name: name.to_string(),
        })
        .collect()
}

impl MockMemoApi {
    /// Create a mock backend with the default categories and no memos.
    pub fn new() -> Self {
        Self::with_categories(default_categories())
    }

    /// Create a mock backend with the given categories and no memos.
    pub fn with_categories(categories: Vec<Category>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                categories,
                memos: BTreeMap::new(),
                next_id: 1,
                calls: HashMap::new(),
                failures: HashMap::new(),
                delay: None,
            })),
        }
    }

    /// Store a memo directly, bypassing call counting.
    pub async fn insert_memo(&self, category_id: CategoryId, title: &str, content: &str) -> MemoDetail {
        let mut state = self.state.lock().await;
        let memo = MemoDetail {
            id: MemoId(state.next_id),
            title: title.to_string(),
            category_id,
            content: content.to_string(),
        };
        state.next_id += 1;
        state.memos.insert(memo.id, memo.clone());
        memo
    }

    /// Make the next call of `call` fail with `error`. Queued per operation.
    pub async fn fail_next(&self, call: ApiCall, error: MemoError) {
        self.state
            .lock()
            .await
            .failures
            .entry(call)
            .or_default()
            .push_back(error);
    }

    /// Delay every subsequent call by `delay` before it touches the store.
    pub async fn set_delay(&self, delay: Option<Duration>) {
        self.state.lock().await.delay = delay;
    }

    /// Number of times `call` has been invoked.
    pub async fn calls(&self, call: ApiCall) -> usize {
        self.state.lock().await.calls.get(&call).copied().unwrap_or(0)
    }

    pub async fn total_calls(&self) -> usize {
        self.state.lock().await.calls.values().sum()
    }

    pub async fn reset_calls(&self) {
        self.state.lock().await.calls.clear();
    }

    /// The stored memo, as the backend currently sees it.
    pub async fn memo(&self, memo_id: MemoId) -> Option<MemoDetail> {
        self.state.lock().await.memos.get(&memo_id).cloned()
    }

    pub async fn memo_count(&self) -> usize {
        self.state.lock().await.memos.len()
    }

    /// Count the call, wait out the configured delay, then pop any
    /// injected failure.
    async fn enter(&self, call: ApiCall) -> Result<(), MemoError> {
        let delay = {
            let mut state = self.state.lock().await;
            *state.calls.entry(call).or_default() += 1;
            state.delay
        };
        debug!(%call, "mock backend call");
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let mut state = self.state.lock().await;
        match state.failures.get_mut(&call).and_then(VecDeque::pop_front) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl Default for MockMemoApi {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found() -> MemoError {
    MemoError::from_status(404, "Not Found")
}

#[async_trait]
impl MemoApi for MockMemoApi {
    async fn list_categories(&self, _token: &AccessToken) -> Result<Vec<Category>, MemoError> {
        self.enter(ApiCall::ListCategories).await?;
        Ok(self.state.lock().await.categories.clone())
    }

    async fn list_memos(
        &self,
        _token: &AccessToken,
        category_id: CategoryId,
    ) -> Result<Vec<Memo>, MemoError> {
        self.enter(ApiCall::ListMemos).await?;
        let state = self.state.lock().await;
        if !state.categories.iter().any(|c| c.id == category_id) {
            return Err(not_found());
        }
        Ok(state
            .memos
            .values()
            .filter(|m| m.category_id == category_id)
            .map(MemoDetail::summary)
            .collect())
    }

    async fn get_memo(&self, _token: &AccessToken, memo_id: MemoId) -> Result<MemoDetail, MemoError> {
        self.enter(ApiCall::GetMemo).await?;
        self.state
            .lock()
            .await
            .memos
            .get(&memo_id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn create_memo(
        &self,
        _token: &AccessToken,
        payload: &MemoPayload,
    ) -> Result<MemoDetail, MemoError> {
        self.enter(ApiCall::CreateMemo).await?;
        let mut state = self.state.lock().await;
        if !state.categories.iter().any(|c| c.id == payload.category_id) {
            return Err(MemoError::from_status(400, "Bad Request"));
        }
        let memo = MemoDetail {
            id: MemoId(state.next_id),
            title: payload.title.clone(),
            category_id: payload.category_id,
            content: payload.content.clone(),
        };
        state.next_id += 1;
        state.memos.insert(memo.id, memo.clone());
        Ok(memo)
    }

    async fn update_memo(
        &self,
        _token: &AccessToken,
        memo_id: MemoId,
        payload: &MemoPayload,
    ) -> Result<MemoDetail, MemoError> {
        self.enter(ApiCall::UpdateMemo).await?;
        let mut state = self.state.lock().await;
        let memo = state.memos.get_mut(&memo_id).ok_or_else(not_found)?;
        memo.title = payload.title.clone();
        memo.content = payload.content.clone();
        memo.category_id = payload.category_id;
        Ok(memo.clone())
    }

    async fn delete_memo(&self, _token: &AccessToken, memo_id: MemoId) -> Result<(), MemoError> {
        self.enter(ApiCall::DeleteMemo).await?;
        self.state
            .lock()
            .await
            .memos
            .remove(&memo_id)
            .map(|_| ())
            .ok_or_else(not_found)
    }
}

#[cfg(test)]
mod tests {
    use memosync_core::generate_access_token;

    use super::*;

    fn payload(category: i64, title: &str) -> MemoPayload {
        MemoPayload {
            category_id: CategoryId(category),
            title: title.to_string(),
            content: String::new(),
        }
    }

    #[tokio::test]
    async fn default_categories_are_listed() {
        let api = MockMemoApi::new();
        let token = generate_access_token();
        let categories = api.list_categories(&token).await.unwrap();
        assert_eq!(categories.len(), 4);
        assert_eq!(api.calls(ApiCall::ListCategories).await, 1);
    }

    #[tokio::test]
    async fn created_memo_is_listed_under_its_category() {
        let api = MockMemoApi::new();
        let token = generate_access_token();

        let created = api.create_memo(&token, &payload(3, "Draft")).await.unwrap();
        let in_three = api.list_memos(&token, CategoryId(3)).await.unwrap();
        let in_two = api.list_memos(&token, CategoryId(2)).await.unwrap();

        assert_eq!(in_three, vec![created.summary()]);
        assert!(in_two.is_empty());
    }

    #[tokio::test]
    async fn update_and_delete_unknown_memo_are_not_found() {
        let api = MockMemoApi::new();
        let token = generate_access_token();

        let err = api.update_memo(&token, MemoId(99), &payload(1, "x")).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        let err = api.delete_memo(&token, MemoId(99)).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn create_in_unknown_category_is_rejected() {
        let api = MockMemoApi::new();
        let token = generate_access_token();
        let err = api.create_memo(&token, &payload(42, "x")).await.unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(api.memo_count().await, 0);
    }

    #[tokio::test]
    async fn injected_failures_are_consumed_in_order() {
        let api = MockMemoApi::new();
        let token = generate_access_token();
        api.fail_next(ApiCall::ListCategories, MemoError::from_status(403, "Forbidden"))
            .await;

        let err = api.list_categories(&token).await.unwrap_err();
        assert_eq!(err.to_string(), "Forbidden. Invalid access token format.");
        assert!(api.list_categories(&token).await.is_ok());
        assert_eq!(api.calls(ApiCall::ListCategories).await, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn delay_applies_before_the_store_is_read() {
        let api = MockMemoApi::new();
        let token = generate_access_token();
        api.set_delay(Some(Duration::from_millis(100))).await;

        let started = tokio::time::Instant::now();
        api.list_categories(&token).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(100));
    }

    #[test]
    fn api_call_names_are_snake_case() {
        assert_eq!(ApiCall::ListMemos.to_string(), "list_memos");
        assert_eq!(ApiCall::DeleteMemo.to_string(), "delete_memo");
    }
}
