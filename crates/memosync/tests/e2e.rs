// SPDX-FileCopyrightText: 2026 Memosync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the memosync client stack.
//!
//! Each test builds an isolated TestHarness (in-memory backend, fresh token)
//! and drives a MemoWorkspace the way the shell does. Tests are independent
//! and order-insensitive.

use std::time::Duration;

use memosync_app::{MemoWorkspace, OwnerResolution, SaveOutcome};
use memosync_config::model::CacheConfig;
use memosync_core::{generate_access_token, CategoryId, MemoError, MemoId};
use memosync_test_utils::{ApiCall, TestHarness};

async fn workspace_for(harness: &TestHarness) -> MemoWorkspace {
    let mut workspace = MemoWorkspace::new(harness.api_handle(), harness.config.clone());
    workspace
        .submit_login(Some(harness.token.as_str()))
        .await
        .expect("login should succeed");
    workspace
}

// ---- Full browse/create/edit/delete walkthrough ----

#[tokio::test]
async fn test_create_edit_delete_walkthrough() {
    let harness = TestHarness::builder().build().await;
    let mut workspace = workspace_for(&harness).await;

    let categories = workspace.categories().await;
    let names: Vec<_> = categories
        .data()
        .unwrap()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert!(names.contains(&"Ideas"));

    assert!(workspace.toggle_category(CategoryId(3)));
    assert!(workspace.expanded_memos().await.data().unwrap().is_empty());

    let created = workspace.create_memo().await.unwrap();
    assert_eq!(workspace.selection().selected_memo(), Some(created.id));
    let listed = workspace.expanded_memos().await;
    assert!(listed.data().unwrap().iter().any(|m| m.id == created.id));

    workspace.editor_mut().unwrap().set_title("Updated");
    let outcome = workspace.save_editor().await.unwrap();
    assert!(matches!(outcome, SaveOutcome::Saved(ref m) if m.title == "Updated"));

    let listed = workspace.expanded_memos().await;
    let titles: Vec<_> = listed
        .data()
        .unwrap()
        .iter()
        .map(|m| m.title.clone())
        .collect();
    assert_eq!(titles, vec!["Updated".to_string()]);

    assert_eq!(workspace.delete_memo().await.unwrap(), created.id);
    assert!(workspace.expanded_memos().await.data().unwrap().is_empty());
    assert_eq!(workspace.selection().selected(), None);
    assert!(workspace.editor().is_none());
    assert!(workspace.operation_error().is_none());
}

// ---- Cache behavior seen through the workspace ----

#[tokio::test(start_paused = true)]
async fn test_concurrent_list_reads_issue_one_request() {
    let harness = TestHarness::builder()
        .with_delay(Duration::from_millis(20))
        .build()
        .await;
    let workspace = workspace_for(&harness).await;

    let (a, b) = tokio::join!(
        workspace.memos(CategoryId(1)),
        workspace.memos(CategoryId(1))
    );

    assert_eq!(a.data(), b.data());
    assert_eq!(harness.api.calls(ApiCall::ListMemos).await, 1);
}

#[tokio::test]
async fn test_list_is_fresh_after_create() {
    let harness = TestHarness::builder().build().await;
    let mut workspace = workspace_for(&harness).await;

    workspace.toggle_category(CategoryId(7));
    assert_eq!(workspace.memos(CategoryId(7)).await.data().map(Vec::len), Some(0));

    let created = workspace.create_memo().await.unwrap();
    let after = workspace.memos(CategoryId(7)).await;

    assert_eq!(after.data(), Some(&vec![created.summary()]));
}

#[tokio::test(start_paused = true)]
async fn test_mount_serves_stale_list_then_refreshes() {
    let harness = TestHarness::builder()
        .with_cache(CacheConfig {
            revalidate_on_mount: true,
            dedupe_interval_ms: 0,
        })
        .build()
        .await;
    let workspace = workspace_for(&harness).await;

    assert!(workspace.memos(CategoryId(2)).await.data().unwrap().is_empty());
    harness.api.insert_memo(CategoryId(2), "Written elsewhere", "").await;

    let stale = workspace.memos(CategoryId(2)).await;
    assert!(stale.data().unwrap().is_empty());
    assert!(stale.is_loading);

    tokio::time::sleep(Duration::from_millis(10)).await;
    let fresh = workspace.memos(CategoryId(2)).await;
    assert_eq!(fresh.data().unwrap()[0].title, "Written elsewhere");
}

#[tokio::test]
async fn test_relogin_with_other_token_does_not_reuse_entries() {
    let harness = TestHarness::builder().build().await;
    let mut workspace = workspace_for(&harness).await;
    workspace.categories().await;

    workspace.logout().await;
    assert!(workspace.categories().await.is_empty());

    let other = generate_access_token();
    workspace.submit_login(Some(other.as_str())).await.unwrap();
    workspace.categories().await;

    assert_eq!(harness.api.calls(ApiCall::ListCategories).await, 2);
    assert_eq!(workspace.session().token(), Some(&other));
}

// ---- Selection and owner resolution ----

#[tokio::test]
async fn test_switching_category_always_clears_selection() {
    let harness = TestHarness::builder()
        .with_memo(CategoryId(1), "A memo", "")
        .build()
        .await;
    let mut workspace = workspace_for(&harness).await;

    for next in [CategoryId(2), CategoryId(1), CategoryId(1)] {
        if workspace.selection().expanded().is_none() {
            workspace.toggle_category(CategoryId(1));
        }
        workspace.select_memo(MemoId(1), None).await.unwrap();
        workspace.toggle_category(next);
        assert_eq!(workspace.selection().selected(), None);
        assert!(workspace.editor().is_none());
    }
}

#[tokio::test]
async fn test_delete_without_resolvable_owner_is_not_found() {
    let harness = TestHarness::builder().build().await;
    let mut workspace = workspace_for(&harness).await;

    let load = workspace.select_memo(MemoId(77), None).await;
    assert!(load.is_err());
    assert_eq!(
        workspace.selection().owner_resolution(),
        OwnerResolution::NeedsLookup(MemoId(77))
    );

    let err = workspace.delete_memo().await.unwrap_err();
    assert!(matches!(err, MemoError::NotFound(_)));
    assert_eq!(harness.api.calls(ApiCall::DeleteMemo).await, 0);
}

// ---- Editor ----

#[tokio::test]
async fn test_save_after_save_is_idempotent() {
    let harness = TestHarness::builder()
        .with_memo(CategoryId(2), "Plan", "draft")
        .build()
        .await;
    let mut workspace = workspace_for(&harness).await;
    workspace.toggle_category(CategoryId(2));
    workspace.select_memo(MemoId(1), None).await.unwrap();

    workspace.editor_mut().unwrap().set_content("final");
    assert!(matches!(workspace.save_editor().await.unwrap(), SaveOutcome::Saved(_)));
    assert_eq!(workspace.save_editor().await.unwrap(), SaveOutcome::Unchanged);

    let editor = workspace.editor().unwrap();
    assert!(!editor.is_dirty());
    assert_eq!(editor.form().content, "final");
    assert_eq!(harness.api.memo(MemoId(1)).await.unwrap().content, "final");
    assert_eq!(harness.api.calls(ApiCall::UpdateMemo).await, 1);
}

#[tokio::test]
async fn test_failed_save_surfaces_server_message() {
    let harness = TestHarness::builder()
        .with_memo(CategoryId(2), "Plan", "draft")
        .build()
        .await;
    let mut workspace = workspace_for(&harness).await;
    workspace.toggle_category(CategoryId(2));
    workspace.select_memo(MemoId(1), None).await.unwrap();
    harness
        .api
        .fail_next(ApiCall::UpdateMemo, MemoError::from_status(400, "Bad Request"))
        .await;

    workspace.editor_mut().unwrap().set_title("Broken");
    assert!(workspace.save_editor().await.is_err());

    assert_eq!(workspace.operation_error(), Some("Bad Request."));
    assert_eq!(workspace.editor().unwrap().form().title, "Broken");
    assert_eq!(harness.api.memo(MemoId(1)).await.unwrap().title, "Plan");
}
