// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool dispatcher: name lookup, schema validation, and error containment.
//!
//! [`ToolDispatcher::dispatch`] never fails. Every call produces exactly one
//! [`ToolResult`]; unknown names, invalid arguments, and tool errors all come
//! back as `{"error": ...}` objects so one bad call cannot abort a batch.

use std::collections::HashMap;
use std::sync::Arc;

use jsonschema::Validator;
use libris_core::{LibrisError, ToolCall, ToolDefinition, ToolResult};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::tool::{ToolOutput, ToolRegistry};

/// Executes model-requested tool calls against a [`ToolRegistry`].
pub struct ToolDispatcher {
    registry: Arc<ToolRegistry>,
    validators: HashMap<String, Validator>,
}

impl ToolDispatcher {
    /// Compiles the argument schema of every registered tool.
    pub fn new(registry: Arc<ToolRegistry>) -> Result<Self, LibrisError> {
        let mut validators = HashMap::with_capacity(registry.len());
        for def in registry.tool_definitions() {
            let validator = jsonschema::validator_for(&def.parameters).map_err(|e| {
                LibrisError::tool(format!("invalid argument schema for {}: {e}", def.name))
            })?;
            validators.insert(def.name, validator);
        }
        Ok(Self {
            registry,
            validators,
        })
    }

    /// Definitions of every tool this dispatcher can run.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.registry.tool_definitions()
    }

    /// Runs one call and returns its result.
    pub async fn dispatch(&self, call: &ToolCall) -> ToolResult {
        let output = self.run(call).await;
        ToolResult {
            tool_call_id: call.id.clone(),
            content: output.content.to_string(),
        }
    }

    /// Runs calls one at a time, in the order given.
    pub async fn dispatch_all(&self, calls: &[ToolCall]) -> Vec<ToolResult> {
        let mut results = Vec::with_capacity(calls.len());
        for call in calls {
            results.push(self.dispatch(call).await);
        }
        results
    }

    async fn run(&self, call: &ToolCall) -> ToolOutput {
        let name = call.name.as_str();
        let Some(tool) = self.registry.get(name) else {
            warn!(tool = name, call_id = %call.id, "tool not found");
            return ToolOutput::error("tool not found");
        };

        if let Some(problems) = self.validate(name, &call.arguments) {
            warn!(tool = name, call_id = %call.id, %problems, "invalid tool arguments");
            return ToolOutput::error(format!("invalid arguments for {name}: {problems}"));
        }

        debug!(tool = name, call_id = %call.id, arguments = %call.arguments, "invoking tool");
        match tool.invoke(call.arguments.clone()).await {
            Ok(output) => {
                info!(tool = name, call_id = %call.id, outcome = "ok", "tool executed");
                output
            }
            Err(e) => {
                warn!(tool = name, call_id = %call.id, error = %e, "tool execution failed");
                ToolOutput::error(format!("execution failed for {name}"))
            }
        }
    }

    /// Joined schema violations, or `None` when the arguments are valid.
    fn validate(&self, name: &str, arguments: &Value) -> Option<String> {
        let validator = self.validators.get(name)?;
        let problems: Vec<String> = validator
            .iter_errors(arguments)
            .map(|e| e.to_string())
            .collect();
        (!problems.is_empty()).then(|| problems.join("; "))
    }
}
