// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Collects every failure instead of stopping at the first one.

use crate::diagnostic::ConfigError;
use crate::model::LibrisConfig;

/// Validate a deserialized configuration for semantic correctness.
pub fn validate_config(config: &LibrisConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    if config.server.host.trim().is_empty() {
        fail("server.host must not be empty".to_string());
    }

    if config.server.max_input_chars == 0 {
        fail("server.max_input_chars must be greater than 0".to_string());
    }

    if config.storage.database_path.trim().is_empty() {
        fail("storage.database_path must not be empty".to_string());
    }

    if !(0.0..=2.0).contains(&config.llm.temperature) {
        fail(format!(
            "llm.temperature must be between 0.0 and 2.0, got {}",
            config.llm.temperature
        ));
    }

    if config.llm.model.trim().is_empty() {
        fail("llm.model must not be empty".to_string());
    }

    for (url, key) in [
        (&config.llm.base_url, "llm.base_url"),
        (&config.books.base_url, "books.base_url"),
    ] {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            fail(format!("{key} must be an http(s) URL, got `{url}`"));
        }
    }

    for pattern in &config.books.blocked_id_patterns {
        if let Err(e) = regex::Regex::new(pattern) {
            fail(format!("books.blocked_id_patterns entry `{pattern}` is not a valid regex: {e}"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
