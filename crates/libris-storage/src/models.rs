// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row types for the reading-list tables.

use libris_core::{Priority, StatsPeriod};
use serde::{Deserialize, Serialize};

/// A book the user intends to read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingBook {
    pub external_id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub thumbnail: Option<String>,
    pub page_count: u32,
    pub priority: Priority,
    pub notes: Option<String>,
    pub added_at: String,
}

/// A book the user has finished.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadBook {
    pub external_id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub thumbnail: Option<String>,
    pub page_count: u32,
    pub rating: Option<u8>,
    pub review: Option<String>,
    pub finished_at: String,
}

/// One entry of the top-authors ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorCount {
    pub author: String,
    pub count: u32,
}

/// Aggregate statistics over read books.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingStats {
    pub total_read: u32,
    pub total_pages: u64,
    /// Mean rating rounded to one decimal; 0 when nothing is rated.
    pub average_rating: f64,
    pub top_authors: Vec<AuthorCount>,
    /// Echo of the requested period. Not applied as a filter.
    pub period: StatsPeriod,
}

/// Current time as a fixed-width RFC 3339 UTC timestamp.
///
/// Millisecond precision keeps lexical and chronological order identical.
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
