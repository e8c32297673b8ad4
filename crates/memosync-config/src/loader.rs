// SPDX-FileCopyrightText: 2026 Memosync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `/etc/memosync/memosync.toml`, then
//! `~/.config/memosync/memosync.toml`, then `./memosync.toml`, with
//! `MEMOSYNC_` environment variables applied last.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::MemosyncConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/memosync/memosync.toml";

/// Config file in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "memosync.toml";

/// Per-user config file under the XDG config directory, if one exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("memosync").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/memosync/memosync.toml`
/// 3. `~/.config/memosync/memosync.toml`
/// 4. `./memosync.toml`
/// 5. `MEMOSYNC_*` environment variables
pub fn load_config() -> Result<MemosyncConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<MemosyncConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MemosyncConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<MemosyncConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MemosyncConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for the standard lookup, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(MemosyncConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Environment provider mapping `MEMOSYNC_<SECTION>_<KEY>` to `section.key`.
///
/// Uses `Env::map()` rather than `Env::split("_")` because keys such as
/// `base_url` contain underscores: `MEMOSYNC_API_BASE_URL` must become
/// `api.base_url`, not `api.base.url`.
fn env_provider() -> Env {
    Env::prefixed("MEMOSYNC_").map(|key| {
        let mapped = key
            .as_str()
            .replacen("api_", "api.", 1)
            .replacen("cache_", "cache.", 1)
            .replacen("editor_", "editor.", 1)
            .replacen("logging_", "logging.", 1);
        mapped.into()
    })
}
