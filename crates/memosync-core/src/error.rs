// SPDX-FileCopyrightText: 2026 Memosync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the memosync client.

use thiserror::Error;

/// The error type returned by every fallible memosync operation.
///
/// Cloneable so a single in-flight request can hand the same outcome to
/// every reader that was coalesced onto it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoError {
    /// No response was obtained (connection failure, timeout, DNS).
    #[error("network error: {message}")]
    Network { message: String },

    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Local pre-flight check failed (token format, missing token, form rules).
    #[error("validation error: {0}")]
    Validation(String),

    /// Derived data such as the owning category of a memo could not be resolved.
    #[error("not found: {0}")]
    NotFound(String),

    /// A successful response body did not match the declared shape.
    #[error("failed to decode response: {message}")]
    Decode { message: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl MemoError {
    /// Builds an [`MemoError::Http`] carrying the canonical message for `status`.
    ///
    /// `reason` is the status line's reason phrase, used for statuses without
    /// a dedicated message.
    pub fn from_status(status: u16, reason: &str) -> Self {
        let message = match status {
            400 => "Bad Request.".to_string(),
            403 => "Forbidden. Invalid access token format.".to_string(),
            404 => "Not Found.".to_string(),
            429 => "Too Many Requests.".to_string(),
            _ => format!("API Error: {status} {reason}").trim_end().to_string(),
        };
        MemoError::Http { status, message }
    }

    /// Returns the HTTP status if the backend rejected the request.
    pub fn status(&self) -> Option<u16> {
        match self {
            MemoError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text suitable for showing to the user next to the failed action.
    pub fn user_message(&self) -> String {
        match self {
            MemoError::Http { message, .. } => message.clone(),
            MemoError::Validation(msg) | MemoError::NotFound(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}
