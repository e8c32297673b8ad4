// SPDX-FileCopyrightText: 2026 Memosync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Strongly-typed request keys.
//!
//! A key is the endpoint shape, its parameters, and the auth identity the
//! request is made with. Two reads with equal keys share one cache entry.

use std::fmt;

use memosync_core::{AccessToken, CategoryId, MemoId};

/// The cacheable read endpoints together with their parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Categories,
    MemoList { category_id: CategoryId },
    MemoDetail { memo_id: MemoId },
}

impl Endpoint {
    /// The category this endpoint's data is scoped to, if any.
    pub fn category(&self) -> Option<CategoryId> {
        match self {
            Endpoint::MemoList { category_id } => Some(*category_id),
            _ => None,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Categories => write!(f, "GET /category"),
            Endpoint::MemoList { category_id } => write!(f, "GET /memo?category_id={category_id}"),
            Endpoint::MemoDetail { memo_id } => write!(f, "GET /memo/{memo_id}"),
        }
    }
}

/// Cache key: endpoint plus the identity it is fetched for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    endpoint: Endpoint,
    identity: AccessToken,
}

impl QueryKey {
    pub fn new(endpoint: Endpoint, identity: AccessToken) -> Self {
        Self { endpoint, identity }
    }

    /// Key for the current session, or `None` (disabled) when logged out.
    pub fn for_session(token: Option<&AccessToken>, endpoint: Endpoint) -> Option<Self> {
        token.map(|t| Self::new(endpoint, t.clone()))
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn identity(&self) -> &AccessToken {
        &self.identity
    }

    /// True if this key lists the memos of `category_id`.
    pub fn references_category(&self, category_id: CategoryId) -> bool {
        self.endpoint.category() == Some(category_id)
    }

    /// True if this key was issued for `token`.
    pub fn belongs_to(&self, token: &AccessToken) -> bool {
        &self.identity == token
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @{}", self.endpoint, self.identity.fingerprint())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn token(s: &str) -> AccessToken {
        AccessToken::parse(s).unwrap()
    }

    const A: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
    const B: &str = "9b2e7c1d-0a4f-4e3b-8c5d-6f7a8b9c0d1e";

    #[test]
    fn equal_tuples_map_to_one_key() {
        let mut keys = HashSet::new();
        keys.insert(QueryKey::new(Endpoint::MemoList { category_id: CategoryId(3) }, token(A)));
        keys.insert(QueryKey::new(Endpoint::MemoList { category_id: CategoryId(3) }, token(A)));
        keys.insert(QueryKey::new(Endpoint::MemoList { category_id: CategoryId(4) }, token(A)));
        keys.insert(QueryKey::new(Endpoint::MemoList { category_id: CategoryId(3) }, token(B)));
        assert_eq!(keys.len(), 3);
    }

    #[test]
    fn list_and_detail_with_same_number_differ() {
        let list = QueryKey::new(Endpoint::MemoList { category_id: CategoryId(5) }, token(A));
        let detail = QueryKey::new(Endpoint::MemoDetail { memo_id: MemoId(5) }, token(A));
        assert_ne!(list, detail);
    }

    #[test]
    fn no_token_disables_key() {
        assert!(QueryKey::for_session(None, Endpoint::Categories).is_none());
        let t = token(A);
        assert!(QueryKey::for_session(Some(&t), Endpoint::Categories).is_some());
    }

    #[test]
    fn only_memo_lists_reference_a_category() {
        let t = token(A);
        let list = QueryKey::new(Endpoint::MemoList { category_id: CategoryId(7) }, t.clone());
        assert!(list.references_category(CategoryId(7)));
        assert!(!list.references_category(CategoryId(8)));
        assert!(!QueryKey::new(Endpoint::Categories, t.clone()).references_category(CategoryId(7)));
        assert!(!QueryKey::new(Endpoint::MemoDetail { memo_id: MemoId(7) }, t).references_category(CategoryId(7)));
    }

    #[test]
    fn display_is_a_stable_fingerprint_without_the_token() {
        let key = QueryKey::new(Endpoint::MemoList { category_id: CategoryId(3) }, token(A));
        assert_eq!(key.to_string(), "GET /memo?category_id=3 @3fa85f64");
    }
}
