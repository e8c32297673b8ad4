// SPDX-FileCopyrightText: 2026 Memosync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Category endpoints.

use memosync_core::{AccessToken, Category, MemoError};
use reqwest::Method;

use crate::transport::{HttpTransport, RequestOptions};

/// `GET /category`
pub async fn list_categories(
    transport: &HttpTransport,
    token: &AccessToken,
) -> Result<Vec<Category>, MemoError> {
    transport
        .request("/category", RequestOptions::new(Method::GET).authorized(token))
        .await
}
