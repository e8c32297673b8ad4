// SPDX-FileCopyrightText: 2026 Memosync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Edit session for a single memo.
//!
//! An [`EditSession`] is bound to one memo id for its whole life. It keeps
//! the last server copy next to the form being edited; the form is dirty
//! while the two differ. A successful save adopts the server's response as
//! the new baseline and refreshes the cached entries that show the memo.

use memosync_core::{AccessToken, MemoDetail, MemoError, MemoField, MemoId, MemoPayload};
use tracing::{debug, info, warn};

use crate::queries::Queries;

/// Lifecycle of an edit session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorState {
    Unloaded,
    Loading,
    Loaded,
    LoadError(String),
}

impl std::fmt::Display for EditorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditorState::Unloaded => write!(f, "unloaded"),
            EditorState::Loading => write!(f, "loading"),
            EditorState::Loaded => write!(f, "loaded"),
            EditorState::LoadError(message) => write!(f, "load failed: {message}"),
        }
    }
}

/// The editable fields of a memo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoForm {
    pub title: String,
    pub content: String,
}

impl From<&MemoDetail> for MemoForm {
    fn from(memo: &MemoDetail) -> Self {
        Self {
            title: memo.title.clone(),
            content: memo.content.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: MemoField,
    pub message: String,
}

/// Checks a form before it is sent. Content may be empty; title may not.
pub fn validate(form: &MemoForm) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if form.title.is_empty() {
        errors.push(FieldError {
            field: MemoField::Title,
            message: "Title is required.".to_string(),
        });
    }
    errors
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Nothing differed from the server copy; no request was made.
    Unchanged,
    Saved(MemoDetail),
}

#[derive(Debug, Clone)]
pub struct EditSession {
    memo_id: MemoId,
    state: EditorState,
    loaded: Option<MemoDetail>,
    form: MemoForm,
    is_saving: bool,
    server_error: Option<String>,
}

impl EditSession {
    pub fn new(memo_id: MemoId) -> Self {
        Self {
            memo_id,
            state: EditorState::Unloaded,
            loaded: None,
            form: MemoForm::default(),
            is_saving: false,
            server_error: None,
        }
    }

    pub fn memo_id(&self) -> MemoId {
        self.memo_id
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.state == EditorState::Loaded
    }

    /// The last copy received from the server.
    pub fn loaded(&self) -> Option<&MemoDetail> {
        self.loaded.as_ref()
    }

    pub fn form(&self) -> &MemoForm {
        &self.form
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.form.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.form.content = content.into();
    }

    pub fn is_dirty(&self) -> bool {
        self.loaded
            .as_ref()
            .is_some_and(|memo| MemoForm::from(memo) != self.form)
    }

    pub fn validate(&self) -> Vec<FieldError> {
        validate(&self.form)
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    pub fn can_save(&self) -> bool {
        self.is_loaded() && self.is_dirty() && self.validate().is_empty() && !self.is_saving
    }

    /// Message from the last failed load or save.
    pub fn server_error(&self) -> Option<&str> {
        self.server_error.as_deref()
    }

    /// Adopts `memo` as the server copy and resets the form to it.
    pub fn reset(&mut self, memo: MemoDetail) {
        self.form = MemoForm::from(&memo);
        self.loaded = Some(memo);
        self.state = EditorState::Loaded;
        self.server_error = None;
    }

    /// Fetches the memo through the cache and resets the form to it.
    pub async fn load(&mut self, queries: &Queries, token: &AccessToken) -> Result<(), MemoError> {
        self.state = EditorState::Loading;
        self.server_error = None;
        match queries.memo(token, self.memo_id).await {
            Ok(memo) => {
                debug!(memo_id = %self.memo_id, "memo loaded into editor");
                self.reset(memo);
                Ok(())
            }
            Err(error) => {
                let message = error.user_message();
                self.loaded = None;
                self.form = MemoForm::default();
                self.server_error = Some(message.clone());
                self.state = EditorState::LoadError(message);
                Err(error)
            }
        }
    }

    /// Sends the form if it differs from the server copy and is valid.
    ///
    /// The memo keeps its category: the loaded `category_id` is resent. On
    /// failure the form is kept as typed and nothing cached is touched.
    pub async fn save(&mut self, queries: &Queries, token: &AccessToken) -> Result<SaveOutcome, MemoError> {
        let Some(previous) = self.loaded.clone() else {
            return Err(MemoError::Validation("Memo is not loaded.".to_string()));
        };
        if !self.is_dirty() {
            debug!(memo_id = %self.memo_id, "save skipped, nothing changed");
            return Ok(SaveOutcome::Unchanged);
        }
        if let Some(first) = self.validate().into_iter().next() {
            return Err(MemoError::Validation(first.message));
        }

        let payload = MemoPayload {
            category_id: previous.category_id,
            title: self.form.title.clone(),
            content: self.form.content.clone(),
        };

        self.is_saving = true;
        self.server_error = None;
        let result = queries.api().update_memo(token, self.memo_id, &payload).await;
        self.is_saving = false;

        match result {
            Ok(updated) => {
                info!(memo_id = %updated.id, category_id = %updated.category_id, "memo saved");
                queries.invalidate_memo(token, self.memo_id).await;
                queries.refresh_memo_list(token, updated.category_id).await;
                if updated.category_id != previous.category_id {
                    queries.refresh_memo_list(token, previous.category_id).await;
                }
                self.reset(updated.clone());
                Ok(SaveOutcome::Saved(updated))
            }
            Err(error) => {
                warn!(memo_id = %self.memo_id, %error, "memo save failed");
                self.server_error = Some(error.user_message());
                Err(error)
            }
        }
    }
}
