// SPDX-FileCopyrightText: 2026 Memosync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the memosync client.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is
//! reported at startup instead of being silently ignored.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Base URL of the public memo backend.
pub const DEFAULT_BASE_URL: &str = "https://challenge-server.tracks.run/memoapp";

/// Top-level memosync configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MemosyncConfig {
    /// Backend connection settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Query cache behavior.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Memo editor settings.
    #[serde(default)]
    pub editor: EditorConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to (no trailing slash needed).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout. Expiry surfaces as a network error.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Query cache configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Re-fetch resolved entries in the background when a view mounts them.
    #[serde(default = "default_true")]
    pub revalidate_on_mount: bool,

    /// Entries fetched more recently than this are served without a
    /// background re-fetch.
    #[serde(default = "default_dedupe_interval_ms")]
    pub dedupe_interval_ms: u64,
}

impl CacheConfig {
    pub fn dedupe_interval(&self) -> Duration {
        Duration::from_millis(self.dedupe_interval_ms)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            revalidate_on_mount: true,
            dedupe_interval_ms: default_dedupe_interval_ms(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_dedupe_interval_ms() -> u64 {
    2000
}

/// Memo editor configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EditorConfig {
    /// Title given to memos created from the workspace.
    #[serde(default = "default_new_memo_title")]
    pub new_memo_title: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            new_memo_title: default_new_memo_title(),
        }
    }
}

fn default_new_memo_title() -> String {
    "New memo".to_string()
}

/// Log output configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
