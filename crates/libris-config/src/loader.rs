// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Merge order (later overrides earlier): compiled defaults,
//! `/etc/libris/libris.toml`, `~/.config/libris/libris.toml`,
//! `./libris.toml`, then `LIBRIS_*` environment variables.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::LibrisConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/libris/libris.toml";

/// Config file in the working directory.
pub const LOCAL_CONFIG_PATH: &str = "libris.toml";

/// Returns the per-user config file path, if a config dir exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("libris").join("libris.toml"))
}

/// Load configuration from the standard hierarchy with env var overrides.
pub fn load_config() -> Result<LibrisConfig, figment::Error> {
    let mut figment = Figment::new()
        .merge(Serialized::defaults(LibrisConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH));
    if let Some(user) = user_config_path() {
        figment = figment.merge(Toml::file(user));
    }
    figment
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<LibrisConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LibrisConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<LibrisConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LibrisConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Maps `LIBRIS_<SECTION>_<KEY>` to `<section>.<key>`.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `LIBRIS_LLM_API_KEY` must become `llm.api_key`.
fn env_provider() -> Env {
    Env::prefixed("LIBRIS_").map(|key| map_env_key(key.as_str()).into())
}

fn map_env_key(key: &str) -> String {
    const SECTIONS: [&str; 5] = ["agent", "server", "llm", "books", "storage"];
    for section in SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}
