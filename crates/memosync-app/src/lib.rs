// SPDX-FileCopyrightText: 2026 Memosync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client-side state for browsing and editing memos.
//!
//! [`MemoWorkspace`] is the single store object a front end drives. It owns
//! the session, the shared query cache, the category/memo selection and the
//! open edit session, and keeps cached lists consistent after mutations.

pub mod editor;
pub mod login;
pub mod queries;
pub mod selection;
pub mod session;
pub mod workspace;

pub use editor::{EditSession, EditorState, FieldError, MemoForm, SaveOutcome};
pub use login::LoginForm;
pub use queries::{MemoCache, Queries, Resource};
pub use selection::{OwnerResolution, SelectedMemo, Selection};
pub use session::{SessionPhase, SessionState};
pub use workspace::MemoWorkspace;
