// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog tools: `searchBooks` and `getBookDetails`.
//!
//! Catalog failures are reported to the model as `{"error": ...}` objects,
//! so these tools only return `Err` for malformed arguments.

use std::sync::Arc;

use async_trait::async_trait;
use libris_core::{BookCatalog, LibrisError};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::warn;

use super::parse_args;
use crate::tool::{Tool, ToolOutput};

const DEFAULT_MAX_RESULTS: usize = 10;

/// Free-text search against the book catalog.
pub struct SearchBooksTool {
    catalog: Arc<dyn BookCatalog>,
}

impl SearchBooksTool {
    pub fn new(catalog: Arc<dyn BookCatalog>) -> Self {
        Self { catalog }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchArgs {
    query: String,
    #[serde(default = "default_max_results")]
    max_results: usize,
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

#[async_trait]
impl Tool for SearchBooksTool {
    fn name(&self) -> &str {
        "searchBooks"
    }

    fn description(&self) -> &str {
        "Search the book catalog by title, author, or topic. Returns book ids usable with the other tools."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "minLength": 1,
                    "description": "Free-text search terms, e.g. an author or a title"
                },
                "maxResults": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 40,
                    "default": DEFAULT_MAX_RESULTS,
                    "description": "Maximum number of books to return"
                }
            },
            "required": ["query"]
        })
    }

    async fn invoke(&self, input: Value) -> Result<ToolOutput, LibrisError> {
        let args: SearchArgs = parse_args(self.name(), input)?;
        match self.catalog.search(&args.query, args.max_results).await {
            Ok(items) => ToolOutput::json(json!({ "items": items })),
            Err(e) => {
                warn!(query = %args.query, error = %e, "book search failed");
                Ok(ToolOutput::error("book search failed"))
            }
        }
    }
}

/// Full record for one catalog id.
pub struct GetBookDetailsTool {
    catalog: Arc<dyn BookCatalog>,
}

impl GetBookDetailsTool {
    pub fn new(catalog: Arc<dyn BookCatalog>) -> Self {
        Self { catalog }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookIdArgs {
    book_id: String,
}

#[async_trait]
impl Tool for GetBookDetailsTool {
    fn name(&self) -> &str {
        "getBookDetails"
    }

    fn description(&self) -> &str {
        "Get the full details of a book (description, page count, categories, rating) by its id."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "bookId": { "type": "string", "minLength": 1, "description": "Catalog id of the book" }
            },
            "required": ["bookId"]
        })
    }

    async fn invoke(&self, input: Value) -> Result<ToolOutput, LibrisError> {
        let args: BookIdArgs = parse_args(self.name(), input)?;
        match self.catalog.get_details(&args.book_id).await {
            Ok(details) => ToolOutput::json(details),
            Err(LibrisError::BookNotFound(_)) => Ok(ToolOutput::error("not found")),
            Err(e) => {
                warn!(book_id = %args.book_id, error = %e, "book lookup failed");
                Ok(ToolOutput::error("book lookup failed"))
            }
        }
    }
}
