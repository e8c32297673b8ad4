// SPDX-FileCopyrightText: 2026 Memosync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed reads through the shared query cache.
//!
//! Every cacheable read is expressed as a [`QueryKey`]; the fetcher for a key
//! is derived from its endpoint, so a key and the request it stands for can
//! never disagree.

use std::future::Future;
use std::sync::Arc;

use memosync_cache::{CacheEntry, Endpoint, QueryCache, QueryKey};
use memosync_core::{AccessToken, Category, CategoryId, Memo, MemoApi, MemoDetail, MemoError, MemoId};
use tracing::warn;

/// Any value stored in the cache.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    Categories(Vec<Category>),
    Memos(Vec<Memo>),
    Memo(MemoDetail),
}

impl Resource {
    fn kind(&self) -> &'static str {
        match self {
            Resource::Categories(_) => "categories",
            Resource::Memos(_) => "memo list",
            Resource::Memo(_) => "memo",
        }
    }

    fn mismatch(self, expected: &str) -> MemoError {
        MemoError::Internal(format!(
            "cached {} where {expected} was expected",
            self.kind()
        ))
    }

    pub fn into_categories(self) -> Result<Vec<Category>, MemoError> {
        match self {
            Resource::Categories(categories) => Ok(categories),
            other => Err(other.mismatch("categories")),
        }
    }

    pub fn into_memos(self) -> Result<Vec<Memo>, MemoError> {
        match self {
            Resource::Memos(memos) => Ok(memos),
            other => Err(other.mismatch("memo list")),
        }
    }

    pub fn into_memo(self) -> Result<MemoDetail, MemoError> {
        match self {
            Resource::Memo(memo) => Ok(memo),
            other => Err(other.mismatch("memo")),
        }
    }
}

pub type MemoCache = QueryCache<QueryKey, Resource>;

fn fetch(
    api: Arc<dyn MemoApi>,
    key: QueryKey,
) -> impl Future<Output = Result<Resource, MemoError>> + Send + 'static {
    async move {
        let token = key.identity();
        match key.endpoint() {
            Endpoint::Categories => api.list_categories(token).await.map(Resource::Categories),
            Endpoint::MemoList { category_id } => {
                api.list_memos(token, category_id).await.map(Resource::Memos)
            }
            Endpoint::MemoDetail { memo_id } => {
                api.get_memo(token, memo_id).await.map(Resource::Memo)
            }
        }
    }
}

/// The backend plus the cache in front of it.
#[derive(Clone)]
pub struct Queries {
    api: Arc<dyn MemoApi>,
    cache: MemoCache,
}

impl Queries {
    pub fn new(api: Arc<dyn MemoApi>, cache: MemoCache) -> Self {
        Self { api, cache }
    }

    /// Direct backend access, for mutations and login probes.
    pub fn api(&self) -> &Arc<dyn MemoApi> {
        &self.api
    }

    pub fn cache(&self) -> &MemoCache {
        &self.cache
    }

    async fn mount(&self, key: Option<QueryKey>) -> CacheEntry<Resource> {
        let api = Arc::clone(&self.api);
        let fetch_key = key.clone();
        self.cache
            .mount(key.as_ref(), move || async move {
                match fetch_key {
                    Some(key) => fetch(api, key).await,
                    None => Err(MemoError::Internal("fetch issued for a disabled key".into())),
                }
            })
            .await
    }

    async fn get(&self, key: QueryKey) -> Result<Resource, MemoError> {
        let api = Arc::clone(&self.api);
        let fetch_key = key.clone();
        self.cache.get(&key, move || fetch(api, fetch_key)).await
    }

    async fn revalidate(&self, key: QueryKey) -> Result<Resource, MemoError> {
        let api = Arc::clone(&self.api);
        let fetch_key = key.clone();
        self.cache.revalidate(&key, move || fetch(api, fetch_key)).await
    }

    /// Category list for the session; disabled without a token.
    pub async fn categories(&self, token: Option<&AccessToken>) -> CacheEntry<Vec<Category>> {
        self.mount(QueryKey::for_session(token, Endpoint::Categories))
            .await
            .try_map(Resource::into_categories)
    }

    /// Memos of one category; disabled without a token.
    pub async fn memos(
        &self,
        token: Option<&AccessToken>,
        category_id: CategoryId,
    ) -> CacheEntry<Vec<Memo>> {
        self.mount(QueryKey::for_session(token, Endpoint::MemoList { category_id }))
            .await
            .try_map(Resource::into_memos)
    }

    /// One memo with content, fetched at most once while fresh.
    pub async fn memo(&self, token: &AccessToken, memo_id: MemoId) -> Result<MemoDetail, MemoError> {
        self.get(QueryKey::new(Endpoint::MemoDetail { memo_id }, token.clone()))
            .await?
            .into_memo()
    }

    /// Marks every entry of `token` that lists `category_id` for re-fetch.
    pub async fn invalidate_category(&self, token: &AccessToken, category_id: CategoryId) -> usize {
        self.cache
            .invalidate_where(|key| key.belongs_to(token) && key.references_category(category_id))
            .await
    }

    /// Invalidates a category's memo list and re-fetches it now. Failures
    /// are logged, not returned: the mutation that triggered the refresh
    /// already succeeded.
    pub async fn refresh_memo_list(&self, token: &AccessToken, category_id: CategoryId) {
        self.invalidate_category(token, category_id).await;
        let key = QueryKey::new(Endpoint::MemoList { category_id }, token.clone());
        if let Err(error) = self.revalidate(key).await {
            warn!(%category_id, %error, "memo list refresh failed");
        }
    }

    pub async fn invalidate_memo(&self, token: &AccessToken, memo_id: MemoId) {
        let key = QueryKey::new(Endpoint::MemoDetail { memo_id }, token.clone());
        self.cache.invalidate(&key).await;
    }

    /// Drops a memo's detail entry once the memo no longer exists.
    pub async fn forget_memo(&self, token: &AccessToken, memo_id: MemoId) {
        let key = QueryKey::new(Endpoint::MemoDetail { memo_id }, token.clone());
        self.cache.purge_where(|k| k == &key).await;
    }

    pub async fn seed_categories(&self, token: &AccessToken, categories: Vec<Category>) {
        let key = QueryKey::new(Endpoint::Categories, token.clone());
        self.cache.seed(key, Resource::Categories(categories)).await;
    }

    pub async fn seed_memo(&self, token: &AccessToken, memo: MemoDetail) {
        let key = QueryKey::new(Endpoint::MemoDetail { memo_id: memo.id }, token.clone());
        self.cache.seed(key, Resource::Memo(memo)).await;
    }

    /// Drops every entry fetched with `token`.
    pub async fn purge_identity(&self, token: &AccessToken) -> usize {
        self.cache.purge_where(|key| key.belongs_to(token)).await
    }
}

#[cfg(test)]
mod tests {
    use memosync_cache::CacheOptions;
    use memosync_test_utils::{ApiCall, MockMemoApi};

    use super::*;

    fn queries(api: &Arc<MockMemoApi>) -> Queries {
        let handle: Arc<dyn MemoApi> = api.clone();
        Queries::new(handle, MemoCache::new(CacheOptions::default()))
    }

    #[tokio::test]
    async fn logged_out_reads_are_disabled() {
        let api = Arc::new(MockMemoApi::new());
        let queries = queries(&api);

        let entry = queries.categories(None).await;
        assert!(entry.is_empty());
        assert!(!entry.is_loading);
        assert_eq!(api.total_calls().await, 0);
    }

    #[tokio::test]
    async fn repeated_category_reads_hit_the_cache() {
        let api = Arc::new(MockMemoApi::new());
        let queries = queries(&api);
        let token = memosync_core::generate_access_token();

        let first = queries.categories(Some(&token)).await;
        let second = queries.categories(Some(&token)).await;

        assert_eq!(first.data().map(Vec::len), Some(4));
        assert_eq!(first.data(), second.data());
        assert_eq!(api.calls(ApiCall::ListCategories).await, 1);
    }

    #[tokio::test]
    async fn identities_do_not_share_entries() {
        let api = Arc::new(MockMemoApi::new());
        let queries = queries(&api);
        let alice = memosync_core::generate_access_token();
        let bob = memosync_core::generate_access_token();

        queries.categories(Some(&alice)).await;
        queries.categories(Some(&bob)).await;
        assert_eq!(api.calls(ApiCall::ListCategories).await, 2);

        assert_eq!(queries.purge_identity(&alice).await, 1);
        assert_eq!(queries.cache().len().await, 1);
    }

    #[tokio::test]
    async fn refreshed_list_reflects_backend_changes() {
        let api = Arc::new(MockMemoApi::new());
        let queries = queries(&api);
        let token = memosync_core::generate_access_token();

        let before = queries.memos(Some(&token), CategoryId(7)).await;
        assert_eq!(before.data().map(Vec::len), Some(0));

        let created = api.insert_memo(CategoryId(7), "Fresh", "").await;
        queries.refresh_memo_list(&token, CategoryId(7)).await;

        let after = queries.memos(Some(&token), CategoryId(7)).await;
        assert_eq!(after.data(), Some(&vec![created.summary()]));
    }

    #[tokio::test]
    async fn category_invalidation_is_scoped_to_list_and_identity() {
        let api = Arc::new(MockMemoApi::new());
        let queries = queries(&api);
        let alice = memosync_core::generate_access_token();
        let bob = memosync_core::generate_access_token();

        queries.memos(Some(&alice), CategoryId(1)).await;
        queries.memos(Some(&alice), CategoryId(2)).await;
        queries.memos(Some(&bob), CategoryId(1)).await;
        queries.categories(Some(&alice)).await;

        assert_eq!(queries.invalidate_category(&alice, CategoryId(1)).await, 1);

        api.reset_calls().await;
        queries.memos(Some(&alice), CategoryId(1)).await;
        queries.memos(Some(&alice), CategoryId(2)).await;
        queries.memos(Some(&bob), CategoryId(1)).await;
        queries.categories(Some(&alice)).await;
        assert_eq!(api.calls(ApiCall::ListMemos).await, 1);
        assert_eq!(api.calls(ApiCall::ListCategories).await, 0);
    }

    #[tokio::test]
    async fn seeded_memo_is_served_without_a_request() {
        let api = Arc::new(MockMemoApi::new());
        let queries = queries(&api);
        let token = memosync_core::generate_access_token();
        let memo = MemoDetail {
            id: MemoId(5),
            title: "t".into(),
            category_id: CategoryId(1),
            content: "c".into(),
        };

        queries.seed_memo(&token, memo.clone()).await;
        assert_eq!(queries.memo(&token, MemoId(5)).await.unwrap(), memo);
        assert_eq!(api.calls(ApiCall::GetMemo).await, 0);
    }

    #[test]
    fn resource_kind_mismatch_is_internal_error() {
        let err = Resource::Memos(vec![]).into_categories().unwrap_err();
        assert_eq!(
            err,
            MemoError::Internal("cached memo list where categories was expected".into())
        );
    }
}
