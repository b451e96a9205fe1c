// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for the Libris reading list.
//!
//! Provides the [`Database`] lifecycle (PRAGMAs, embedded migrations,
//! checkpoint on close), query modules for the `pending_books` and
//! `read_books` tables, and the [`ReadingList`] service used by the tools.

pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;
pub mod reading_list;

pub use database::Database;
pub use models::{AuthorCount, PendingBook, ReadBook, ReadingStats};
pub use queries::InsertOutcome;
pub use reading_list::{AddOutcome, MarkReadOutcome, ReadingList};
