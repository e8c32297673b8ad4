// SPDX-FileCopyrightText: 2026 Memosync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The store object a front end drives.
//!
//! `MemoWorkspace` owns the session, the shared cache, the selection and the
//! open edit session. Its mutating operations record a user-facing
//! `operation_error` on failure and also return the `Result`.

use std::sync::Arc;

use memosync_cache::{CacheEntry, CacheOptions};
use memosync_config::MemosyncConfig;
use memosync_core::{
    AccessToken, Category, CategoryId, Memo, MemoApi, MemoDetail, MemoError, MemoId, MemoPayload,
};
use tracing::{debug, info, warn};

use crate::editor::{EditSession, SaveOutcome};
use crate::login::LoginForm;
use crate::queries::{MemoCache, Queries};
use crate::selection::{OwnerResolution, Selection};
use crate::session::SessionState;

pub struct MemoWorkspace {
    queries: Queries,
    config: MemosyncConfig,
    session: SessionState,
    login: LoginForm,
    selection: Selection,
    editor: Option<EditSession>,
    operation_error: Option<String>,
}

impl MemoWorkspace {
    pub fn new(api: Arc<dyn MemoApi>, config: MemosyncConfig) -> Self {
        let cache = MemoCache::new(CacheOptions::from(&config.cache));
        Self {
            queries: Queries::new(api, cache),
            config,
            session: SessionState::new(),
            login: LoginForm::prefilled(),
            selection: Selection::new(),
            editor: None,
            operation_error: None,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn login_form(&self) -> &LoginForm {
        &self.login
    }

    pub fn login_form_mut(&mut self) -> &mut LoginForm {
        &mut self.login
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn queries(&self) -> &Queries {
        &self.queries
    }

    pub fn config(&self) -> &MemosyncConfig {
        &self.config
    }

    pub fn editor(&self) -> Option<&EditSession> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut EditSession> {
        self.editor.as_mut()
    }

    /// Message of the last failed operation, cleared by the next success.
    pub fn operation_error(&self) -> Option<&str> {
        self.operation_error.as_deref()
    }

    fn record<T>(&mut self, result: Result<T, MemoError>) -> Result<T, MemoError> {
        self.operation_error = result.as_ref().err().map(MemoError::user_message);
        result
    }

    fn token(&self) -> Result<AccessToken, MemoError> {
        self.session
            .token()
            .cloned()
            .ok_or_else(|| MemoError::Validation("Not logged in.".to_string()))
    }

    /// Submits the login form, optionally replacing its input first.
    pub async fn submit_login(&mut self, input: Option<&str>) -> Result<(), MemoError> {
        if let Some(input) = input {
            self.login.on_change(input);
        }
        if let Some(previous) = self.session.logout() {
            self.queries.purge_identity(&previous).await;
        }
        self.selection = Selection::new();
        self.editor = None;
        let result = self
            .login
            .submit(&mut self.session, &self.queries)
            .await
            .map(|_| ());
        self.record(result)
    }

    /// Ends the session and drops everything cached for its token.
    pub async fn logout(&mut self) {
        if let Some(token) = self.session.logout() {
            let purged = self.queries.purge_identity(&token).await;
            debug!(purged, "cleared cache for logged out session");
        }
        self.selection = Selection::new();
        self.editor = None;
        self.operation_error = None;
        self.login = LoginForm::prefilled();
    }

    pub async fn categories(&self) -> CacheEntry<Vec<Category>> {
        self.queries.categories(self.session.token()).await
    }

    pub async fn memos(&self, category_id: CategoryId) -> CacheEntry<Vec<Memo>> {
        self.queries.memos(self.session.token(), category_id).await
    }

    /// Memos of the expanded category; empty when nothing is expanded.
    pub async fn expanded_memos(&self) -> CacheEntry<Vec<Memo>> {
        match self.selection.expanded() {
            Some(category_id) => self.memos(category_id).await,
            None => CacheEntry::disabled(),
        }
    }

    /// Expands or collapses a category. The selection is always cleared,
    /// so any open editor is discarded.
    pub fn toggle_category(&mut self, category_id: CategoryId) -> bool {
        let expanded = self.selection.toggle_category(category_id);
        self.editor = None;
        expanded
    }

    /// Selects a memo and loads it into the editor. Selecting the memo that
    /// is already open keeps its unsaved edits.
    ///
    /// Once the memo is loaded, its `category_id` from the backend replaces
    /// whatever owner the selection inferred from `from_list` or the
    /// expanded category.
    pub async fn select_memo(
        &mut self,
        memo_id: MemoId,
        from_list: Option<CategoryId>,
    ) -> Result<(), MemoError> {
        let result = self.try_select_memo(memo_id, from_list).await;
        self.record(result)
    }

    async fn try_select_memo(
        &mut self,
        memo_id: MemoId,
        from_list: Option<CategoryId>,
    ) -> Result<(), MemoError> {
        let token = self.token()?;
        self.selection.select_memo(memo_id, from_list);
        if self.editor.as_ref().map(EditSession::memo_id) != Some(memo_id) {
            self.editor = Some(EditSession::new(memo_id));
        }
        if let Some(editor) = self.editor.as_mut()
            && !editor.is_loaded()
        {
            editor.load(&self.queries, &token).await?;
        }
        if let Some(memo) = self.editor.as_ref().and_then(EditSession::loaded) {
            self.selection.set_owner(memo.category_id);
        }
        Ok(())
    }

    /// Creates a memo in the expanded category and selects it.
    pub async fn create_memo(&mut self) -> Result<MemoDetail, MemoError> {
        let result = self.try_create_memo().await;
        self.record(result)
    }

    async fn try_create_memo(&mut self) -> Result<MemoDetail, MemoError> {
        let token = self.token()?;
        let category_id = self.selection.expanded().ok_or_else(|| {
            MemoError::Validation("Open a category before creating a memo.".to_string())
        })?;

        let payload = MemoPayload {
            category_id,
            title: self.config.editor.new_memo_title.clone(),
            content: String::new(),
        };
        let created = self.queries.api().create_memo(&token, &payload).await?;
        info!(memo_id = %created.id, category_id = %created.category_id, "memo created");

        self.queries.refresh_memo_list(&token, created.category_id).await;
        self.queries.seed_memo(&token, created.clone()).await;

        self.selection.select_memo(created.id, Some(created.category_id));
        let mut editor = EditSession::new(created.id);
        editor.reset(created.clone());
        self.editor = Some(editor);
        Ok(created)
    }

    /// Deletes the selected memo once its owner category is known.
    ///
    /// When neither the selection nor the expanded category names the owner,
    /// the memo detail is fetched; if that fails the delete is abandoned
    /// with [`MemoError::NotFound`] and no delete request is sent.
    pub async fn delete_memo(&mut self) -> Result<MemoId, MemoError> {
        let result = self.try_delete_memo().await;
        self.record(result)
    }

    async fn try_delete_memo(&mut self) -> Result<MemoId, MemoError> {
        let token = self.token()?;
        let (memo_id, owner) = match self.selection.owner_resolution() {
            OwnerResolution::NothingSelected => {
                return Err(MemoError::Validation(
                    "Select a memo before deleting.".to_string(),
                ));
            }
            OwnerResolution::Known {
                memo_id,
                category_id,
            } => (memo_id, category_id),
            OwnerResolution::NeedsLookup(memo_id) => {
                let detail = self.queries.memo(&token, memo_id).await.map_err(|error| {
                    warn!(%memo_id, %error, "owner lookup failed");
                    MemoError::NotFound(format!(
                        "Could not determine the category of memo {memo_id}."
                    ))
                })?;
                (memo_id, detail.category_id)
            }
        };

        self.queries.api().delete_memo(&token, memo_id).await?;
        info!(%memo_id, category_id = %owner, "memo deleted");

        self.queries.forget_memo(&token, memo_id).await;
        self.queries.refresh_memo_list(&token, owner).await;
        self.selection.clear();
        self.editor = None;
        Ok(memo_id)
    }

    /// Saves the open editor and records the memo's owner from the response.
    pub async fn save_editor(&mut self) -> Result<SaveOutcome, MemoError> {
        let result = self.try_save_editor().await;
        self.record(result)
    }

    async fn try_save_editor(&mut self) -> Result<SaveOutcome, MemoError> {
        let token = self.token()?;
        let editor = self
            .editor
            .as_mut()
            .ok_or_else(|| MemoError::Validation("No memo is open.".to_string()))?;
        let outcome = editor.save(&self.queries, &token).await?;
        if let SaveOutcome::Saved(updated) = &outcome {
            self.selection.set_owner(updated.category_id);
        }
        Ok(outcome)
    }

    /// Closes the editor and deselects its memo.
    pub fn close_editor(&mut self) {
        self.selection.clear();
        self.editor = None;
    }
}
