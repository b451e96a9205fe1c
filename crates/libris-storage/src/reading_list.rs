// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reading-list service combining the catalog with the SQLite store.
//!
//! [`ReadingList`] owns no global state: it is constructed once from an
//! opened [`Database`] and a [`BookCatalog`] and shared behind an `Arc`.

use std::sync::Arc;

use libris_core::{BookCatalog, LibrisError, Priority, StatsPeriod};
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::database::Database;
use crate::models::{PendingBook, ReadBook, ReadingStats, now_timestamp};
use crate::queries::{InsertOutcome, pending, read, stats};

/// Outcome of [`ReadingList::add_pending`].
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    Added(PendingBook),
    Duplicate,
    BookNotFound,
}

impl AddOutcome {
    /// The JSON object handed back to the model.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Added(entry) => json!({ "success": true, "entry": entry }),
            Self::Duplicate => failure("duplicate"),
            Self::BookNotFound => failure("book not found"),
        }
    }
}

/// Outcome of [`ReadingList::mark_read`].
#[derive(Debug, Clone, PartialEq)]
pub enum MarkReadOutcome {
    Marked(ReadBook),
    Duplicate,
    NotAvailable,
}

impl MarkReadOutcome {
    /// The JSON object handed back to the model.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Marked(entry) => json!({ "success": true, "entry": entry }),
            Self::Duplicate => failure("duplicate"),
            Self::NotAvailable => failure("not available"),
        }
    }
}

fn failure(error: &str) -> Value {
    json!({ "success": false, "error": error })
}

/// Personal reading list backed by SQLite.
pub struct ReadingList {
    db: Arc<Database>,
    catalog: Arc<dyn BookCatalog>,
}

impl ReadingList {
    pub fn new(db: Arc<Database>, catalog: Arc<dyn BookCatalog>) -> Self {
        Self { db, catalog }
    }

    /// The underlying database handle.
    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }

    /// Adds a book to the pending list after resolving its metadata.
    ///
    /// Storage is not touched when the catalog cannot resolve the id.
    pub async fn add_pending(
        &self,
        external_id: &str,
        priority: Option<Priority>,
        notes: Option<String>,
    ) -> Result<AddOutcome, LibrisError> {
        let details = match self.catalog.get_details(external_id).await {
            Ok(details) => details,
            Err(e) => {
                warn!(external_id, error = %e, "could not resolve book for reading list");
                return Ok(AddOutcome::BookNotFound);
            }
        };

        let entry = PendingBook {
            external_id: external_id.to_string(),
            title: details.title,
            authors: details.authors,
            thumbnail: details.thumbnail,
            page_count: details.page_count,
            priority: priority.unwrap_or_default(),
            notes,
            added_at: now_timestamp(),
        };

        match pending::insert_pending(&self.db, &entry).await? {
            InsertOutcome::Created => {
                info!(external_id = %entry.external_id, priority = %entry.priority, "book added to reading list");
                Ok(AddOutcome::Added(entry))
            }
            InsertOutcome::Duplicate => {
                debug!(external_id, "book already on reading list");
                Ok(AddOutcome::Duplicate)
            }
        }
    }

    /// Pending entries, most recently added first.
    pub async fn list_pending(&self, limit: u32) -> Result<Vec<PendingBook>, LibrisError> {
        pending::list_pending(&self.db, limit).await
    }

    /// Finished books, most recently finished first.
    pub async fn list_read(&self, limit: u32) -> Result<Vec<ReadBook>, LibrisError> {
        read::list_read(&self.db, limit).await
    }

    /// Moves a book to the read list.
    ///
    /// Metadata comes from the matching pending entry when there is one and
    /// from the catalog otherwise.
    pub async fn mark_read(
        &self,
        external_id: &str,
        rating: Option<u8>,
        review: Option<String>,
    ) -> Result<MarkReadOutcome, LibrisError> {
        if let Some(r) = rating {
            if !(1..=5).contains(&r) {
                return Err(LibrisError::InvalidRequest(format!(
                    "rating must be between 1 and 5, got {r}"
                )));
            }
        }

        let (title, authors, thumbnail, page_count) =
            match pending::get_pending(&self.db, external_id).await? {
                Some(p) => (p.title, p.authors, p.thumbnail, p.page_count),
                None => match self.catalog.get_details(external_id).await {
                    Ok(d) => (d.title, d.authors, d.thumbnail, d.page_count),
                    Err(e) => {
                        warn!(external_id, error = %e, "book not available to mark as read");
                        return Ok(MarkReadOutcome::NotAvailable);
                    }
                },
            };

        let entry = ReadBook {
            external_id: external_id.to_string(),
            title,
            authors,
            thumbnail,
            page_count,
            rating,
            review,
            finished_at: now_timestamp(),
        };

        match read::insert_read_and_clear_pending(&self.db, &entry).await? {
            InsertOutcome::Created => {
                info!(external_id, ?rating, "book marked as read");
                Ok(MarkReadOutcome::Marked(entry))
            }
            InsertOutcome::Duplicate => {
                debug!(external_id, "book already marked as read");
                Ok(MarkReadOutcome::Duplicate)
            }
        }
    }

    /// Aggregate statistics over finished books.
    pub async fn stats(&self, period: StatsPeriod) -> Result<ReadingStats, LibrisError> {
        stats::reading_stats(&self.db, period).await
    }
}
