// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Libris configuration system.

use std::io::Write;

use libris_config::diagnostic::ConfigError;
use libris_config::model::LibrisConfig;
use libris_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

#[test]
fn full_toml_deserializes() {
    let toml = r#"
[agent]
log_level = "debug"
system_prompt = "You are a librarian."

[server]
host = "0.0.0.0"
port = 8088
max_input_chars = 500

[llm]
api_key = "sk-test"
base_url = "https://api.groq.com/openai/v1"
model = "llama-3.3-70b-versatile"
temperature = 0.2
max_tokens = 512

[books]
api_key = "books-key"
description_chars = 120
blocked_id_patterns = ["^X"]

[storage]
database_path = "/tmp/libris-test.db"
wal_mode = false
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.log_level, "debug");
    assert_eq!(config.agent.system_prompt.as_deref(), Some("You are a librarian."));
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8088);
    assert_eq!(config.server.max_input_chars, 500);
    assert_eq!(config.llm.api_key.as_deref(), Some("sk-test"));
    assert_eq!(config.llm.model, "llama-3.3-70b-versatile");
    assert!((config.llm.temperature - 0.2).abs() < f32::EPSILON);
    assert_eq!(config.books.description_chars, 120);
    assert_eq!(config.books.blocked_id_patterns, vec!["^X"]);
    assert_eq!(config.storage.database_path, "/tmp/libris-test.db");
    assert!(!config.storage.wal_mode);
}

#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").unwrap();
    let defaults = LibrisConfig::default();
    assert_eq!(config.server.port, defaults.server.port);
    assert_eq!(config.server.max_input_chars, 2000);
    assert_eq!(config.books.description_chars, 200);
    assert_eq!(config.books.blocked_id_patterns.len(), 2);
    assert!(config.llm.api_key.is_none());
}

#[test]
fn unknown_key_gets_suggestion() {
    let errors = load_and_validate_str("[llm]\nmodle = \"gpt\"\n").unwrap_err();
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "modle");
            assert_eq!(suggestion.as_deref(), Some("model"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn unknown_section_is_rejected() {
    let errors = load_and_validate_str("[telegram]\nbot_token = \"x\"\n").unwrap_err();
    assert!(matches!(errors[0], ConfigError::UnknownKey { .. }));
}

#[test]
fn wrong_type_is_reported() {
    let errors = load_and_validate_str("[server]\nport = \"eighty\"\n").unwrap_err();
    assert!(matches!(errors[0], ConfigError::InvalidType { .. }));
}

#[test]
fn semantic_validation_runs_after_parse() {
    let errors = load_and_validate_str("[llm]\ntemperature = 5.0\n").unwrap_err();
    assert!(matches!(errors[0], ConfigError::Validation { .. }));
}

#[test]
fn loads_from_explicit_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[server]\nport = 9999").unwrap();

    let config = load_and_validate_path(file.path()).unwrap();
    assert_eq!(config.server.port, 9999);
}
