// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Libris reading companion.
//!
//! Holds the error type, the conversation and catalog types, and the adapter
//! traits that the provider, catalog, tool, and storage crates build on.

pub mod error;
pub mod traits;
pub mod types;

pub use error::LibrisError;
pub use traits::{BookCatalog, ProviderAdapter};
pub use types::{
    BookDetails, BookSummary, HealthStatus, Message, Priority, ProviderRequest, ProviderResponse,
    Role, StatsPeriod, ToolCall, ToolDefinition, ToolResult,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn libris_error_displays_context() {
        let err = LibrisError::BookNotFound("BAD_ID".into());
        assert_eq!(err.to_string(), "book not found: BAD_ID");

        let err = LibrisError::provider("API returned 503");
        assert_eq!(err.to_string(), "provider error: API returned 503");

        let err = LibrisError::Storage {
            source: Box::new(std::io::Error::other("disk full")),
        };
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn adapter_traits_are_object_safe() {
        fn _assert_provider(_: &dyn ProviderAdapter) {}
        fn _assert_catalog(_: &dyn BookCatalog) {}
    }

    #[test]
    fn provider_response_detects_tool_calls() {
        let mut response = ProviderResponse::default();
        assert!(!response.has_tool_calls());
        response.tool_calls.push(ToolCall {
            id: "call_1".into(),
            name: "searchBooks".into(),
            arguments: serde_json::json!({"query": "Asimov"}),
        });
        assert!(response.has_tool_calls());
    }
}
