// SPDX-FileCopyrightText: 2026 Memosync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Which category is expanded and which memo is selected.
//!
//! Pure state. Expanding a different category, or collapsing the current
//! one, always clears the memo selection. A selected memo remembers the
//! category it was picked from when that is known; otherwise its owner has
//! to be looked up before owner-scoped mutations (delete) can proceed.

use memosync_core::{CategoryId, MemoId};

/// A selected memo and, when known, the category it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedMemo {
    pub memo_id: MemoId,
    pub owner: Option<CategoryId>,
}

/// How the owner category of the current selection can be determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerResolution {
    /// Owner known from the selection itself or the expanded category.
    Known {
        memo_id: MemoId,
        category_id: CategoryId,
    },
    /// Owner unknown; the memo detail must be fetched.
    NeedsLookup(MemoId),
    NothingSelected,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    expanded: Option<CategoryId>,
    selected: Option<SelectedMemo>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expanded(&self) -> Option<CategoryId> {
        self.expanded
    }

    pub fn selected(&self) -> Option<SelectedMemo> {
        self.selected
    }

    pub fn selected_memo(&self) -> Option<MemoId> {
        self.selected.map(|s| s.memo_id)
    }

    /// Expands `category_id`, or collapses it if it is already expanded.
    /// Returns whether it is expanded afterwards.
    pub fn toggle_category(&mut self, category_id: CategoryId) -> bool {
        self.selected = None;
        if self.expanded == Some(category_id) {
            self.expanded = None;
            false
        } else {
            self.expanded = Some(category_id);
            true
        }
    }

    /// Selects `memo_id`. `from_list` is the category listing it was picked
    /// from; without it the expanded category is assumed.
    pub fn select_memo(&mut self, memo_id: MemoId, from_list: Option<CategoryId>) {
        self.selected = Some(SelectedMemo {
            memo_id,
            owner: from_list.or(self.expanded),
        });
    }

    pub fn owner_resolution(&self) -> OwnerResolution {
        match self.selected {
            None => OwnerResolution::NothingSelected,
            Some(SelectedMemo { memo_id, owner }) => match owner.or(self.expanded) {
                Some(category_id) => OwnerResolution::Known {
                    memo_id,
                    category_id,
                },
                None => OwnerResolution::NeedsLookup(memo_id),
            },
        }
    }

    /// Records the owner reported by the backend for the selected memo.
    pub fn set_owner(&mut self, category_id: CategoryId) {
        if let Some(selected) = &mut self.selected {
            selected.owner = Some(category_id);
        }
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }
}
