// SPDX-FileCopyrightText: 2026 Memosync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` bundles a pre-seeded [`MockMemoApi`], a valid session token
//! and a configuration tuned for tests, so controller tests only have to
//! build the workspace on top.

use std::sync::Arc;
use std::time::Duration;

use memosync_config::model::{CacheConfig, MemosyncConfig};
use memosync_core::{generate_access_token, AccessToken, Category, CategoryId, MemoApi};

use crate::mock_api::{default_categories, MockMemoApi};

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    categories: Vec<Category>,
    memos: Vec<(CategoryId, String, String)>,
    delay: Option<Duration>,
    cache: CacheConfig,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            categories: default_categories(),
            memos: Vec::new(),
            delay: None,
            // Background revalidation off so call counts stay deterministic.
            cache: CacheConfig {
                revalidate_on_mount: false,
                ..CacheConfig::default()
            },
        }
    }

    /// Replace the default categories.
    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    /// Seed a memo in the backend.
    pub fn with_memo(mut self, category_id: CategoryId, title: &str, content: &str) -> Self {
        self.memos
            .push((category_id, title.to_string(), content.to_string()));
        self
    }

    /// Delay every backend call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Override the cache settings.
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    /// Build the harness, seeding the mock backend.
    pub async fn build(self) -> TestHarness {
        let api = Arc::new(MockMemoApi::with_categories(self.categories));
        for (category_id, title, content) in &self.memos {
            api.insert_memo(*category_id, title, content).await;
        }
        api.set_delay(self.delay).await;

        let config = MemosyncConfig {
            cache: self.cache,
            ..MemosyncConfig::default()
        };

        TestHarness {
            api,
            token: generate_access_token(),
            config,
        }
    }
}

/// A complete test environment around an in-memory backend.
pub struct TestHarness {
    /// The mock backend, shared with whatever the test builds on top.
    pub api: Arc<MockMemoApi>,
    /// A well-formed token the backend accepts.
    pub token: AccessToken,
    /// Configuration for the client under test.
    pub config: MemosyncConfig,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// The backend as the trait object the client code consumes.
    pub fn api_handle(&self) -> Arc<dyn MemoApi> {
        self.api.clone()
    }
}

#[cfg(test)]
mod tests {
    use crate::mock_api::ApiCall;

    use super::*;

    #[tokio::test]
    async fn harness_seeds_memos_without_counting_calls() {
        let harness = TestHarness::builder()
            .with_memo(CategoryId(3), "Seeded", "body")
            .build()
            .await;

        assert_eq!(harness.api.memo_count().await, 1);
        assert_eq!(harness.api.total_calls().await, 0);

        let memos = harness
            .api_handle()
            .list_memos(&harness.token, CategoryId(3))
            .await
            .unwrap();
        assert_eq!(memos[0].title, "Seeded");
        assert_eq!(harness.api.calls(ApiCall::ListMemos).await, 1);
    }

    #[tokio::test]
    async fn harness_disables_mount_revalidation_by_default() {
        let harness = TestHarness::builder().build().await;
        assert!(!harness.config.cache.revalidate_on_mount);
    }
}
