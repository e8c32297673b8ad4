// SPDX-FileCopyrightText: 2026 Memosync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::MemosyncConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &MemosyncConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let base_url = config.api.base_url.trim();
    if base_url.is_empty() {
        errors.push(ConfigError::invalid_value("api.base_url", "must not be empty"));
    } else if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        errors.push(ConfigError::invalid_value(
            "api.base_url",
            format!("`{base_url}` must start with http:// or https://"),
        ));
    }

    if config.api.timeout_secs == 0 {
        errors.push(ConfigError::invalid_value("api.timeout_secs", "must be at least 1"));
    }

    if config.editor.new_memo_title.trim().is_empty() {
        errors.push(ConfigError::invalid_value("editor.new_memo_title", "must not be empty"));
    }

    let level = config.logging.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::invalid_value(
            "logging.level",
            format!("`{}` is not one of {}", config.logging.level, LOG_LEVELS.join(", ")),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
