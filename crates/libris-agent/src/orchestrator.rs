// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Two-pass tool-calling chat orchestration.
//!
//! Each request moves through an explicit state machine:
//!
//! ```text
//! Composed --(no tool calls)--------------------------> Finalized
//! Composed --(tool calls)--> ToolsPending --(2nd call)--> Finalized
//! ```
//!
//! The second provider call is made without tools, and any tool calls it
//! returns are dropped, so a request never runs more than one round of tools
//! and never makes more than two provider calls. Provider failures end the
//! request; tool failures are contained by the dispatcher.

use std::sync::Arc;

use libris_core::{LibrisError, Message, ProviderAdapter, ProviderRequest, ProviderResponse};
use libris_skill::ToolDispatcher;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Final answer for one chat request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub content: String,
    /// Names of the tools invoked, in call order.
    pub tools_used: Vec<String>,
}

/// Per-request orchestration state.
enum TurnState {
    /// System prompt prepended to the client history.
    Composed(Vec<Message>),
    /// The first reply asked for tools.
    ToolsPending {
        composed: Vec<Message>,
        first: ProviderResponse,
    },
    Finalized(ChatReply),
}

/// Drives the two-pass conversation with the provider.
pub struct ChatOrchestrator {
    provider: Arc<dyn ProviderAdapter>,
    dispatcher: Arc<ToolDispatcher>,
    system_prompt: String,
    temperature: f32,
}

impl ChatOrchestrator {
    pub fn new(
        provider: Arc<dyn ProviderAdapter>,
        dispatcher: Arc<ToolDispatcher>,
        system_prompt: String,
        temperature: f32,
    ) -> Self {
        Self {
            provider,
            dispatcher,
            system_prompt,
            temperature,
        }
    }

    pub fn provider(&self) -> &Arc<dyn ProviderAdapter> {
        &self.provider
    }

    /// Answers a conversation. `history` is the full client-side transcript.
    pub async fn handle(&self, history: Vec<Message>) -> Result<ChatReply, LibrisError> {
        if history.is_empty() {
            return Err(LibrisError::InvalidRequest("messages must not be empty".into()));
        }

        let mut state = TurnState::Composed(self.compose(history));
        loop {
            state = match state {
                TurnState::Composed(composed) => self.first_dispatch(composed).await?,
                TurnState::ToolsPending { composed, first } => {
                    self.run_tools_and_finalize(composed, first).await?
                }
                TurnState::Finalized(reply) => {
                    info!(tools_used = ?reply.tools_used, "chat turn finalized");
                    return Ok(reply);
                }
            };
        }
    }

    fn compose(&self, history: Vec<Message>) -> Vec<Message> {
        let mut composed = Vec::with_capacity(history.len() + 1);
        composed.push(Message::system(self.system_prompt.clone()));
        composed.extend(history);
        composed
    }

    async fn first_dispatch(&self, composed: Vec<Message>) -> Result<TurnState, LibrisError> {
        let request = ProviderRequest {
            messages: composed.clone(),
            tools: Some(self.dispatcher.definitions()),
            temperature: self.temperature,
        };
        debug!(messages = composed.len(), "first provider call");
        let first = self.provider.complete(request).await?;

        if first.has_tool_calls() {
            Ok(TurnState::ToolsPending { composed, first })
        } else {
            Ok(TurnState::Finalized(ChatReply {
                content: first.content,
                tools_used: Vec::new(),
            }))
        }
    }

    async fn run_tools_and_finalize(
        &self,
        mut composed: Vec<Message>,
        first: ProviderResponse,
    ) -> Result<TurnState, LibrisError> {
        let calls = first.tool_calls;
        let tools_used: Vec<String> = calls.iter().map(|c| c.name.clone()).collect();
        info!(tools = ?tools_used, "model requested tools");

        let results = self.dispatcher.dispatch_all(&calls).await;
        debug_assert_eq!(results.len(), calls.len());

        composed.push(Message::assistant_tool_calls(first.content, calls));
        composed.extend(results.iter().map(Message::tool_result));

        let request = ProviderRequest {
            messages: composed,
            tools: None,
            temperature: self.temperature,
        };
        let second = self.provider.complete(request).await?;
        if second.has_tool_calls() {
            warn!(
                ignored = second.tool_calls.len(),
                "second reply requested tools; ignoring"
            );
        }

        Ok(TurnState::Finalized(ChatReply {
            content: second.content,
            tools_used,
        }))
    }
}
