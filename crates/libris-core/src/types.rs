// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the provider, catalog, tool, and storage layers.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Health status reported by health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Fully operational.
    Healthy,
    /// Not operational.
    Unhealthy(String),
}

// --- Conversation types ---

/// Author of a conversation message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
    Tool,
}

/// A single message in a conversation.
///
/// The sequence of messages is resent in full on every request, so order is
/// significant. Assistant messages that requested tools carry `tool_calls`;
/// tool messages carry the `tool_call_id` they answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub role: Role,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
}

impl Message {
    fn plain(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_call_id: None,
            tool_calls: Vec::new(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::plain(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::plain(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::plain(Role::Assistant, content)
    }

    /// An assistant turn that requested tool invocations.
    pub fn assistant_tool_calls(content: impl Into<String>, calls: Vec<ToolCall>) -> Self {
        Self {
            tool_calls: calls,
            ..Self::plain(Role::Assistant, content)
        }
    }

    /// A tool message answering the call identified by `result.tool_call_id`.
    pub fn tool_result(result: &ToolResult) -> Self {
        Self {
            tool_call_id: Some(result.tool_call_id.clone()),
            ..Self::plain(Role::Tool, result.content.clone())
        }
    }
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
}

/// The structured output returned to the model for one [`ToolCall`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub tool_call_id: String,
    /// JSON-serialized result object.
    pub content: String,
}

/// A tool declaration offered to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema describing the tool's arguments.
    pub parameters: serde_json::Value,
}

// --- Provider types ---

/// A request to an LLM provider.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub messages: Vec<Message>,
    /// Tools offered for this call. `None` means the model may not call tools.
    pub tools: Option<Vec<ToolDefinition>>,
    pub temperature: f32,
}

/// A response from an LLM provider.
#[derive(Debug, Clone, Default)]
pub struct ProviderResponse {
    /// Assistant text, empty when the model only requested tools.
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
    pub model: String,
    pub finish_reason: Option<String>,
}

impl ProviderResponse {
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

// --- Catalog types ---

/// A compact search hit from the book catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub thumbnail: Option<String>,
    pub short_description: String,
}

/// Full catalog record for one book.
///
/// Every field is always present; missing upstream values are replaced by
/// placeholders so the model sees a stable shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDetails {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub description: String,
    pub page_count: u32,
    pub categories: Vec<String>,
    pub thumbnail: Option<String>,
    pub published_date: String,
    pub average_rating: f64,
}

// --- Reading list enums ---

/// Priority of a pending reading-list entry.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

/// Period requested for reading statistics.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum StatsPeriod {
    #[default]
    AllTime,
    Year,
    Month,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Tool).unwrap(), "\"tool\"");
        assert_eq!(Role::from_str("assistant").unwrap(), Role::Assistant);
    }

    #[test]
    fn message_deserializes_from_client_shape() {
        let msg: Message =
            serde_json::from_str(r#"{"role":"user","content":"Busca libros de Asimov"}"#).unwrap();
        assert_eq!(msg.role, Role::User);
        assert!(msg.tool_call_id.is_none());
        assert!(msg.tool_calls.is_empty());
    }

    #[test]
    fn tool_message_carries_call_id() {
        let result = ToolResult {
            tool_call_id: "call_1".into(),
            content: r#"{"items":[]}"#.into(),
        };
        let msg = Message::tool_result(&result);
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "tool");
        assert_eq!(json["toolCallId"], "call_1");
        assert!(json.get("toolCalls").is_none());
    }

    #[test]
    fn stats_period_uses_kebab_case() {
        assert_eq!(StatsPeriod::AllTime.to_string(), "all-time");
        assert_eq!(StatsPeriod::from_str("month").unwrap(), StatsPeriod::Month);
        let parsed: StatsPeriod = serde_json::from_str("\"year\"").unwrap();
        assert_eq!(parsed, StatsPeriod::Year);
    }

    #[test]
    fn priority_defaults_to_medium() {
        assert_eq!(Priority::default(), Priority::Medium);
        assert!(Priority::from_str("urgent").is_err());
    }

    #[test]
    fn book_details_keeps_null_thumbnail() {
        let details = BookDetails {
            id: "abc".into(),
            title: "Foundation".into(),
            authors: vec!["Isaac Asimov".into()],
            description: "No description available".into(),
            page_count: 0,
            categories: vec![],
            thumbnail: None,
            published_date: "Unknown".into(),
            average_rating: 0.0,
        };
        let json = serde_json::to_value(&details).unwrap();
        assert!(json["thumbnail"].is_null());
        assert_eq!(json["pageCount"], 0);
        assert_eq!(json["publishedDate"], "Unknown");
    }
}
