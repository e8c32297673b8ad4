// SPDX-FileCopyrightText: 2026 Memosync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types exchanged with the memo backend.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Backend identifier of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub i64);

/// Backend identifier of a memo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoId(pub i64);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for MemoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A category. Read-only from the client's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// A memo as it appears in a category listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    pub id: MemoId,
    pub title: String,
}

/// Full memo including its owning category and body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoDetail {
    pub id: MemoId,
    pub title: String,
    pub category_id: CategoryId,
    pub content: String,
}

impl MemoDetail {
    /// The listing form of this memo.
    pub fn summary(&self) -> Memo {
        Memo {
            id: self.id,
            title: self.title.clone(),
        }
    }
}

/// Request body for creating or updating a memo.
///
/// The backend requires `category_id` on updates even when the memo stays
/// in the same category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoPayload {
    pub category_id: CategoryId,
    pub title: String,
    pub content: String,
}

/// Editable fields of a memo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum MemoField {
    Title,
    Content,
}
