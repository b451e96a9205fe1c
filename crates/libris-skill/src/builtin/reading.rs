// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reading-list tools backed by [`ReadingList`].

use std::sync::Arc;

use async_trait::async_trait;
use libris_core::{LibrisError, Priority, StatsPeriod};
use libris_storage::ReadingList;
use serde::Deserialize;
use serde_json::{Value, json};

use super::parse_args;
use crate::tool::{Tool, ToolOutput};

const DEFAULT_LIST_LIMIT: u32 = 20;

/// `addToReadingList`: queue a book to read later.
pub struct AddToReadingListTool {
    list: Arc<ReadingList>,
}

impl AddToReadingListTool {
    pub fn new(list: Arc<ReadingList>) -> Self {
        Self { list }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddArgs {
    book_id: String,
    priority: Option<Priority>,
    notes: Option<String>,
}

#[async_trait]
impl Tool for AddToReadingListTool {
    fn name(&self) -> &str {
        "addToReadingList"
    }

    fn description(&self) -> &str {
        "Add a book to the user's pending reading list."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "bookId": { "type": "string", "minLength": 1, "description": "Catalog id of the book" },
                "priority": {
                    "type": "string",
                    "enum": ["high", "medium", "low"],
                    "default": "medium"
                },
                "notes": { "type": "string", "description": "Why the user wants to read it" }
            },
            "required": ["bookId"]
        })
    }

    async fn invoke(&self, input: Value) -> Result<ToolOutput, LibrisError> {
        let args: AddArgs = parse_args(self.name(), input)?;
        let outcome = self
            .list
            .add_pending(&args.book_id, args.priority, args.notes)
            .await?;
        Ok(ToolOutput {
            content: outcome.to_json(),
        })
    }
}

/// `getReadingList`: pending books, newest first.
pub struct GetReadingListTool {
    list: Arc<ReadingList>,
}

impl GetReadingListTool {
    pub fn new(list: Arc<ReadingList>) -> Self {
        Self { list }
    }
}

#[derive(Debug, Deserialize)]
struct LimitArgs {
    #[serde(default = "default_limit")]
    limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_LIST_LIMIT
}

#[async_trait]
impl Tool for GetReadingListTool {
    fn name(&self) -> &str {
        "getReadingList"
    }

    fn description(&self) -> &str {
        "List the books on the user's pending reading list, most recently added first."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "limit": { "type": "integer", "minimum": 1, "maximum": 100, "default": DEFAULT_LIST_LIMIT }
            }
        })
    }

    async fn invoke(&self, input: Value) -> Result<ToolOutput, LibrisError> {
        let args: LimitArgs = parse_args(self.name(), input)?;
        let items = self.list.list_pending(args.limit).await?;
        ToolOutput::json(json!({ "count": items.len(), "items": items }))
    }
}

/// `markAsRead`: move a book to the finished list.
pub struct MarkAsReadTool {
    list: Arc<ReadingList>,
}

impl MarkAsReadTool {
    pub fn new(list: Arc<ReadingList>) -> Self {
        Self { list }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarkArgs {
    book_id: String,
    rating: Option<u8>,
    review: Option<String>,
}

#[async_trait]
impl Tool for MarkAsReadTool {
    fn name(&self) -> &str {
        "markAsRead"
    }

    fn description(&self) -> &str {
        "Mark a book as read, optionally with a 1-5 rating and a short review. Removes it from the pending list."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "bookId": { "type": "string", "minLength": 1 },
                "rating": { "type": "integer", "minimum": 1, "maximum": 5 },
                "review": { "type": "string" }
            },
            "required": ["bookId"]
        })
    }

    async fn invoke(&self, input: Value) -> Result<ToolOutput, LibrisError> {
        let args: MarkArgs = parse_args(self.name(), input)?;
        let outcome = self
            .list
            .mark_read(&args.book_id, args.rating, args.review)
            .await?;
        Ok(ToolOutput {
            content: outcome.to_json(),
        })
    }
}

/// `getReadingStats`: totals, average rating, and top authors.
pub struct GetReadingStatsTool {
    list: Arc<ReadingList>,
}

impl GetReadingStatsTool {
    pub fn new(list: Arc<ReadingList>) -> Self {
        Self { list }
    }
}

#[derive(Debug, Deserialize)]
struct StatsArgs {
    #[serde(default)]
    period: StatsPeriod,
}

#[async_trait]
impl Tool for GetReadingStatsTool {
    fn name(&self) -> &str {
        "getReadingStats"
    }

    fn description(&self) -> &str {
        "Summarize the user's reading: books and pages read, average rating, and favourite authors."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "period": { "type": "string", "enum": ["all-time", "year", "month"], "default": "all-time" }
            }
        })
    }

    async fn invoke(&self, input: Value) -> Result<ToolOutput, LibrisError> {
        let args: StatsArgs = parse_args(self.name(), input)?;
        ToolOutput::json(self.list.stats(args.period).await?)
    }
}
