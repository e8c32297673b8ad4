// SPDX-FileCopyrightText: 2026 Memosync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP transport for the memo backend.
//!
//! Provides [`HttpTransport`], which attaches the access token header, maps
//! status codes onto [`MemoError`], and decodes JSON bodies. It never
//! retries; callers decide whether to surface or repeat a failure.

use std::time::Duration;

use memosync_config::model::ApiConfig;
use memosync_core::{AccessToken, MemoError};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Header carrying the access token on every authenticated request.
pub const ACCESS_TOKEN_HEADER: &str = "X-ACCESS-TOKEN";

/// Per-request options for [`HttpTransport::request`].
#[derive(Debug, Clone)]
pub struct RequestOptions<'a> {
    pub method: Method,
    pub body: Option<serde_json::Value>,
    pub token: Option<&'a AccessToken>,
    /// Reject the call locally when no token is present.
    pub token_required: bool,
}

impl<'a> RequestOptions<'a> {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            body: None,
            token: None,
            token_required: false,
        }
    }

    /// Attaches `token` and marks it as required.
    pub fn authorized(mut self, token: &'a AccessToken) -> Self {
        self.token = Some(token);
        self.token_required = true;
        self
    }

    /// Serializes `body` as the JSON request body.
    pub fn with_json<B: serde::Serialize>(mut self, body: &B) -> Result<Self, MemoError> {
        let value = serde_json::to_value(body)
            .map_err(|e| MemoError::Internal(format!("failed to encode request body: {e}")))?;
        self.body = Some(value);
        Ok(self)
    }
}

/// HTTP client for the memo backend.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpTransport {
    /// Creates a transport from the `[api]` configuration section.
    pub fn new(config: &ApiConfig) -> Result<Self, MemoError> {
        Self::with_base_url(&config.base_url, config.timeout())
    }

    /// Creates a transport for an explicit base URL.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, MemoError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| MemoError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends one request to `endpoint` and decodes the response as `T`.
    ///
    /// A 204 or empty body decodes from JSON `null`, so `T = ()` is the
    /// natural type for endpoints without a response body.
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions<'_>,
    ) -> Result<T, MemoError> {
        if options.token_required && options.token.is_none() {
            return Err(MemoError::Validation(format!(
                "{endpoint} requires an access token"
            )));
        }

        let url = format!("{}{endpoint}", self.base_url);
        let mut builder = self.client.request(options.method.clone(), &url);
        if let Some(token) = options.token {
            builder = builder.header(ACCESS_TOKEN_HEADER, token.as_str());
        }
        if let Some(body) = &options.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| self.network_error(e))?;

        let status = response.status();
        debug!(method = %options.method, endpoint, status = %status, "response received");

        if !status.is_success() {
            warn!(method = %options.method, endpoint, status = %status, "request rejected");
            return Err(MemoError::from_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            ));
        }

        let bytes = response.bytes().await.map_err(|e| self.network_error(e))?;
        if status == StatusCode::NO_CONTENT || bytes.is_empty() {
            return serde_json::from_value(serde_json::Value::Null).map_err(|e| MemoError::Decode {
                message: format!("{endpoint} returned no body: {e}"),
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| MemoError::Decode {
            message: format!("{endpoint}: {e}"),
        })
    }

    fn network_error(&self, err: reqwest::Error) -> MemoError {
        let message = if err.is_timeout() {
            format!("request timed out after {:?}", self.timeout)
        } else {
            err.to_string()
        };
        MemoError::Network { message }
    }
}
