// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog trait for read-only book lookup services.

use async_trait::async_trait;

use crate::error::LibrisError;
use crate::types::{BookDetails, BookSummary};

/// A read-only source of book metadata.
#[async_trait]
pub trait BookCatalog: Send + Sync + 'static {
    /// Free-text search returning at most `max_results` filtered hits.
    async fn search(&self, query: &str, max_results: usize)
    -> Result<Vec<BookSummary>, LibrisError>;

    /// Looks up one book by its external identifier.
    ///
    /// Returns [`LibrisError::BookNotFound`] when the identifier does not
    /// resolve to a usable record.
    async fn get_details(&self, id: &str) -> Result<BookDetails, LibrisError>;
}
