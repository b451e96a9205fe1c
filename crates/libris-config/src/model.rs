// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so typos in config keys
//! are rejected at startup with a suggestion instead of silently ignored.

use serde::{Deserialize, Serialize};

/// Top-level Libris configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LibrisConfig {
    /// Assistant behavior and logging.
    #[serde(default)]
    pub agent: AgentConfig,

    /// HTTP gateway settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// OpenAI-compatible LLM provider settings.
    #[serde(default)]
    pub llm: LlmConfig,

    /// Book catalog API settings.
    #[serde(default)]
    pub books: BooksConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Assistant behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Inline system prompt. Overridden by `system_prompt_file` if both set.
    #[serde(default)]
    pub system_prompt: Option<String>,

    /// Path to a file containing the system prompt.
    #[serde(default)]
    pub system_prompt_file: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            system_prompt: None,
            system_prompt_file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Longest accepted user message, in characters.
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_input_chars: default_max_input_chars(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_input_chars() -> usize {
    2000
}

/// OpenAI-compatible provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LlmConfig {
    /// API key. `None` falls back to the `OPENAI_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the chat-completions API (without `/chat/completions`).
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_llm_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_llm_timeout_secs(),
        }
    }
}

fn default_llm_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_llm_timeout_secs() -> u64 {
    60
}

/// Book catalog configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BooksConfig {
    #[serde(default = "default_books_base_url")]
    pub base_url: String,

    /// Optional catalog API key, sent as the `key` query parameter.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Character budget for search-result descriptions.
    #[serde(default = "default_description_chars")]
    pub description_chars: usize,

    /// Regexes matching catalog ids that must never be surfaced.
    #[serde(default = "default_blocked_id_patterns")]
    pub blocked_id_patterns: Vec<String>,

    #[serde(default = "default_books_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BooksConfig {
    fn default() -> Self {
        Self {
            base_url: default_books_base_url(),
            api_key: None,
            description_chars: default_description_chars(),
            blocked_id_patterns: default_blocked_id_patterns(),
            timeout_secs: default_books_timeout_secs(),
        }
    }
}

fn default_books_base_url() -> String {
    "https://www.googleapis.com/books/v1".to_string()
}

fn default_description_chars() -> usize {
    200
}

fn default_blocked_id_patterns() -> Vec<String> {
    vec!["[^A-Za-z0-9_-]".to_string(), "^BAD_".to_string()]
}

fn default_books_timeout_secs() -> u64 {
    15
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("libris").join("libris.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("libris.db"))
        .display()
        .to_string()
}

fn default_wal_mode() -> bool {
    true
}
