// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool trait and registry.
//!
//! The [`Tool`] trait is the interface every model-callable function
//! implements. The [`ToolRegistry`] looks tools up by name and produces the
//! [`ToolDefinition`] list offered to the provider.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use libris_core::{LibrisError, ToolDefinition};
use serde::Serialize;
use serde_json::Value;

/// Output from a tool invocation: a JSON object handed back to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutput {
    pub content: Value,
}

impl ToolOutput {
    /// Serializes any value into a tool output.
    pub fn json(value: impl Serialize) -> Result<Self, LibrisError> {
        serde_json::to_value(value)
            .map(|content| Self { content })
            .map_err(|e| LibrisError::Tool {
                message: format!("failed to serialize tool output: {e}"),
                source: Some(Box::new(e)),
            })
    }

    /// A structured `{"error": ...}` output the model can read.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: serde_json::json!({ "error": message.into() }),
        }
    }
}

/// A named server-side function the model can request.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name, as exposed to the model.
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON Schema of the arguments object.
    fn parameters_schema(&self) -> Value;

    /// Runs the tool on arguments that already passed schema validation.
    async fn invoke(&self, input: Value) -> Result<ToolOutput, LibrisError>;
}

/// Registry of available tools, indexed by name.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Registers a tool under its `name()`, replacing any previous one.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Registered tool names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Tool definitions for the provider request, sorted by name.
    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        let mut defs: Vec<ToolDefinition> = self
            .tools
            .values()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                parameters: t.parameters_schema(),
            })
            .collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
