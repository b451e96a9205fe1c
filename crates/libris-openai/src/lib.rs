// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI-compatible provider adapter for the Libris reading companion.
//!
//! Implements [`ProviderAdapter`] on top of the `/chat/completions` API,
//! translating core messages, tool definitions, and tool calls to and from
//! the wire format.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use libris_config::model::LlmConfig;
use libris_core::{
    LibrisError, Message, ProviderAdapter, ProviderRequest, ProviderResponse, Role, ToolCall,
    ToolDefinition,
};
use tracing::{debug, info};

use crate::client::OpenAiClient;
use crate::types::{
    ApiFunction, ApiFunctionCall, ApiMessage, ApiTool, ApiToolCall, ChatCompletionRequest,
    function_type,
};

/// Environment variable consulted when `llm.api_key` is unset.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// OpenAI-compatible provider implementing [`ProviderAdapter`].
///
/// API key resolution order: `llm.api_key`, then `OPENAI_API_KEY`, else a
/// configuration error.
pub struct OpenAiProvider {
    client: OpenAiClient,
    model: String,
    max_tokens: u32,
}

impl OpenAiProvider {
    pub fn new(config: &LlmConfig) -> Result<Self, LibrisError> {
        let api_key = resolve_api_key(&config.api_key, std::env::var(API_KEY_ENV).ok())?;
        let client = OpenAiClient::new(
            &api_key,
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
        )?;
        info!(model = %config.model, endpoint = client.endpoint(), "LLM provider initialized");
        Ok(Self {
            client,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    /// Model identifier sent with every request.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, request: &ProviderRequest) -> ChatCompletionRequest {
        let tools = request
            .tools
            .as_ref()
            .filter(|tools| !tools.is_empty())
            .map(|tools| tools.iter().map(to_api_tool).collect::<Vec<_>>());
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: request.messages.iter().map(to_api_message).collect(),
            tool_choice: tools.as_ref().map(|_| "auto".to_string()),
            tools,
            temperature: request.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, LibrisError> {
        let api_request = self.build_request(&request);
        debug!(
            model = %api_request.model,
            messages = api_request.messages.len(),
            tools = api_request.tools.as_ref().map_or(0, Vec::len),
            "sending completion request"
        );

        let response = self.client.complete_chat(&api_request).await?;
        let Some(choice) = response.choices.into_iter().next() else {
            return Err(LibrisError::provider("response contained no choices"));
        };

        let tool_calls: Vec<ToolCall> = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(from_api_tool_call)
            .collect();
        debug!(
            model = %response.model,
            finish_reason = ?choice.finish_reason,
            tool_calls = tool_calls.len(),
            "completion received"
        );

        Ok(ProviderResponse {
            content: choice.message.content.unwrap_or_default(),
            tool_calls,
            model: response.model,
            finish_reason: choice.finish_reason,
        })
    }
}

/// Picks the configured key, falling back to the environment value.
pub fn resolve_api_key(
    configured: &Option<String>,
    from_env: Option<String>,
) -> Result<String, LibrisError> {
    configured
        .clone()
        .filter(|k| !k.trim().is_empty())
        .or_else(|| from_env.filter(|k| !k.trim().is_empty()))
        .ok_or_else(|| {
            LibrisError::Config(format!(
                "no LLM API key: set llm.api_key or the {API_KEY_ENV} environment variable"
            ))
        })
}

fn to_api_tool(tool: &ToolDefinition) -> ApiTool {
    ApiTool {
        type_: function_type(),
        function: ApiFunction {
            name: tool.name.clone(),
            description: tool.description.clone(),
            parameters: tool.parameters.clone(),
        },
    }
}

fn to_api_message(msg: &Message) -> ApiMessage {
    let tool_calls = (!msg.tool_calls.is_empty()).then(|| {
        msg.tool_calls
            .iter()
            .map(|call| ApiToolCall {
                id: call.id.clone(),
                type_: function_type(),
                function: ApiFunctionCall {
                    name: call.name.clone(),
                    arguments: match &call.arguments {
                        serde_json::Value::String(raw) => raw.clone(),
                        other => other.to_string(),
                    },
                },
            })
            .collect()
    });
    // Assistant turns that only request tools carry `content: null`.
    let content = if tool_calls.is_some() && msg.content.is_empty() {
        None
    } else {
        Some(msg.content.clone())
    };
    ApiMessage {
        role: msg.role.to_string(),
        content,
        tool_calls,
        tool_call_id: match msg.role {
            Role::Tool => msg.tool_call_id.clone(),
            _ => None,
        },
    }
}

/// Arguments that are not valid JSON are kept as the raw string so the
/// dispatcher can report them as invalid.
fn from_api_tool_call(call: ApiToolCall) -> ToolCall {
    let raw = call.function.arguments;
    let arguments = if raw.trim().is_empty() {
        serde_json::Value::Object(Default::default())
    } else {
        serde_json::from_str(&raw).unwrap_or(serde_json::Value::String(raw))
    };
    ToolCall {
        id: call.id,
        name: call.function.name,
        arguments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libris_core::ToolResult;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_provider(uri: &str) -> OpenAiProvider {
        OpenAiProvider::new(&LlmConfig {
            api_key: Some("sk-test".into()),
            base_url: uri.to_string(),
            model: "gpt-4o-mini".into(),
            ..LlmConfig::default()
        })
        .unwrap()
    }

    fn search_tool() -> ToolDefinition {
        ToolDefinition {
            name: "searchBooks".into(),
            description: "Search the catalog".into(),
            parameters: json!({"type": "object", "properties": {"query": {"type": "string"}}}),
        }
    }

    #[test]
    fn api_key_prefers_config_then_env() {
        assert_eq!(
            resolve_api_key(&Some("cfg".into()), Some("env".into())).unwrap(),
            "cfg"
        );
        assert_eq!(resolve_api_key(&None, Some("env".into())).unwrap(), "env");
        assert_eq!(
            resolve_api_key(&Some("  ".into()), Some("env".into())).unwrap(),
            "env"
        );
        assert!(matches!(
            resolve_api_key(&None, None),
            Err(LibrisError::Config(_))
        ));
    }

    #[test]
    fn tool_turns_convert_to_wire_shape() {
        let call = ToolCall {
            id: "call_1".into(),
            name: "searchBooks".into(),
            arguments: json!({"query": "Asimov"}),
        };
        let assistant = to_api_message(&Message::assistant_tool_calls("", vec![call]));
        assert_eq!(assistant.role, "assistant");
        assert!(assistant.content.is_none());
        let calls = assistant.tool_calls.unwrap();
        assert_eq!(calls[0].function.arguments, r#"{"query":"Asimov"}"#);

        let tool = to_api_message(&Message::tool_result(&ToolResult {
            tool_call_id: "call_1".into(),
            content: "{}".into(),
        }));
        assert_eq!(tool.role, "tool");
        assert_eq!(tool.tool_call_id.as_deref(), Some("call_1"));
    }

    #[test]
    fn malformed_arguments_are_kept_raw() {
        let call = from_api_tool_call(ApiToolCall {
            id: "c".into(),
            type_: function_type(),
            function: ApiFunctionCall {
                name: "searchBooks".into(),
                arguments: "{not json".into(),
            },
        });
        assert_eq!(call.arguments, json!("{not json"));

        let empty = from_api_tool_call(ApiToolCall {
            id: "c".into(),
            type_: function_type(),
            function: ApiFunctionCall {
                name: "getReadingStats".into(),
                arguments: String::new(),
            },
        });
        assert_eq!(empty.arguments, json!({}));
    }

    #[tokio::test]
    async fn first_call_offers_tools_and_returns_calls() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({
                "model": "gpt-4o-mini",
                "tool_choice": "auto"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-2",
                "model": "gpt-4o-mini-2024-07-18",
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": null,
                        "tool_calls": [{
                            "id": "call_9",
                            "type": "function",
                            "function": {"name": "searchBooks", "arguments": "{\"query\":\"Asimov\"}"}
                        }]
                    },
                    "finish_reason": "tool_calls"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = test_provider(&server.uri())
            .complete(ProviderRequest {
                messages: vec![Message::user("Busca libros de Asimov")],
                tools: Some(vec![search_tool()]),
                temperature: 0.7,
            })
            .await
            .unwrap();

        assert!(response.has_tool_calls());
        assert_eq!(response.content, "");
        assert_eq!(response.tool_calls[0].id, "call_9");
        assert_eq!(response.tool_calls[0].arguments, json!({"query": "Asimov"}));
        assert_eq!(response.model, "gpt-4o-mini-2024-07-18");
    }

    #[tokio::test]
    async fn empty_choices_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": "x", "choices": []})),
            )
            .mount(&server)
            .await;

        let err = test_provider(&server.uri())
            .complete(ProviderRequest {
                messages: vec![Message::user("hi")],
                tools: None,
                temperature: 0.7,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, LibrisError::Provider { .. }));
    }
}
