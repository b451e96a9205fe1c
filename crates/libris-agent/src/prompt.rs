// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! System prompt resolution.

use libris_config::model::AgentConfig;
use tracing::{info, warn};

/// Prompt used when neither a prompt file nor an inline prompt is configured.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are Libris, a friendly reading companion. Help the user discover books, \
keep their reading list, and reflect on what they have read. Use the tools to \
search the catalog and to read or change the reading list; never invent book \
ids. Always answer in the language the user writes in, and keep answers short.";

/// Resolves the system prompt.
///
/// 1. `agent.system_prompt_file`, if set and readable and non-empty
/// 2. `agent.system_prompt`, if non-empty
/// 3. [`DEFAULT_SYSTEM_PROMPT`]
pub async fn load_system_prompt(config: &AgentConfig) -> String {
    if let Some(path) = &config.system_prompt_file {
        match tokio::fs::read_to_string(path).await {
            Ok(content) if !content.trim().is_empty() => {
                info!(path = %path, "loaded system prompt from file");
                return content.trim().to_string();
            }
            Ok(_) => warn!(path = %path, "system prompt file is empty, falling back"),
            Err(e) => warn!(path = %path, error = %e, "failed to read system prompt file, falling back"),
        }
    }

    match &config.system_prompt {
        Some(prompt) if !prompt.trim().is_empty() => prompt.clone(),
        _ => DEFAULT_SYSTEM_PROMPT.to_string(),
    }
}
