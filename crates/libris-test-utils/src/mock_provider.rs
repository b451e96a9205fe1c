// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock LLM provider for deterministic testing.
//!
//! `MockProvider` implements [`ProviderAdapter`] with a FIFO queue of
//! scripted replies and records every request it receives, so tests can
//! assert on what the orchestrator actually sent.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use libris_core::{LibrisError, ProviderAdapter, ProviderRequest, ProviderResponse, ToolCall};
use serde_json::Value;
use tokio::sync::Mutex;

/// A scripted provider reply.
#[derive(Debug, Clone)]
enum Scripted {
    Reply(ProviderResponse),
    Failure(String),
}

/// A mock LLM provider that returns pre-configured responses.
///
/// When the queue is empty, a plain "mock response" text is returned.
#[derive(Clone, Default)]
pub struct MockProvider {
    replies: Arc<Mutex<VecDeque<Scripted>>>,
    requests: Arc<Mutex<Vec<ProviderRequest>>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a plain-text assistant reply.
    pub async fn push_text(&self, text: impl Into<String>) {
        self.push(Scripted::Reply(ProviderResponse {
            content: text.into(),
            model: "mock-model".to_string(),
            finish_reason: Some("stop".to_string()),
            ..ProviderResponse::default()
        }))
        .await;
    }

    /// Queue a reply requesting the given `(id, name, arguments)` tool calls.
    pub async fn push_tool_calls(&self, calls: Vec<(&str, &str, Value)>) {
        let tool_calls = calls
            .into_iter()
            .map(|(id, name, arguments)| ToolCall {
                id: id.to_string(),
                name: name.to_string(),
                arguments,
            })
            .collect();
        self.push(Scripted::Reply(ProviderResponse {
            tool_calls,
            model: "mock-model".to_string(),
            finish_reason: Some("tool_calls".to_string()),
            ..ProviderResponse::default()
        }))
        .await;
    }

    /// Queue a provider failure (e.g. a non-success upstream status).
    pub async fn push_failure(&self, message: impl Into<String>) {
        self.push(Scripted::Failure(message.into())).await;
    }

    async fn push(&self, reply: Scripted) {
        self.replies.lock().await.push_back(reply);
    }

    /// Every request received so far, in order.
    pub async fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().await.clone()
    }

    /// Number of completion calls received.
    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, LibrisError> {
        self.requests.lock().await.push(request);
        match self.replies.lock().await.pop_front() {
            Some(Scripted::Reply(response)) => Ok(response),
            Some(Scripted::Failure(message)) => Err(LibrisError::provider(message)),
            None => Ok(ProviderResponse {
                content: "mock response".to_string(),
                model: "mock-model".to_string(),
                ..ProviderResponse::default()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libris_core::Message;

    fn request() -> ProviderRequest {
        ProviderRequest {
            messages: vec![Message::user("hi")],
            tools: None,
            temperature: 0.7,
        }
    }

    #[tokio::test]
    async fn replies_in_fifo_order_then_default() {
        let provider = MockProvider::new();
        provider.push_text("first").await;
        provider
            .push_tool_calls(vec![("c1", "searchBooks", serde_json::json!({"query": "x"}))])
            .await;

        assert_eq!(provider.complete(request()).await.unwrap().content, "first");
        assert!(provider.complete(request()).await.unwrap().has_tool_calls());
        assert_eq!(
            provider.complete(request()).await.unwrap().content,
            "mock response"
        );
        assert_eq!(provider.call_count().await, 3);
    }

    #[tokio::test]
    async fn scripted_failure_is_provider_error() {
        let provider = MockProvider::new();
        provider.push_failure("API returned 500").await;
        let err = provider.complete(request()).await.unwrap_err();
        assert!(matches!(err, LibrisError::Provider { .. }));
        assert_eq!(provider.requests().await.len(), 1);
    }
}
