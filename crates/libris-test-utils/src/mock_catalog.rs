// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory book catalog.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use libris_core::{BookCatalog, BookDetails, BookSummary, LibrisError};

/// A [`BookCatalog`] backed by a fixed set of books.
///
/// Search matches case-insensitively on title and author names, in id order.
#[derive(Clone, Default)]
pub struct MockCatalog {
    books: Arc<BTreeMap<String, BookDetails>>,
    lookups: Arc<AtomicUsize>,
    failing: bool,
}

impl MockCatalog {
    pub fn new(books: Vec<BookDetails>) -> Self {
        Self {
            books: Arc::new(books.into_iter().map(|b| (b.id.clone(), b)).collect()),
            ..Self::default()
        }
    }

    /// A catalog whose every call fails as if the upstream were down.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// A small catalog of classic science fiction.
    pub fn classics() -> Self {
        Self::new(vec![
            book("fdn-1951", "Foundation", "Isaac Asimov", 255),
            book("irb-1950", "I, Robot", "Isaac Asimov", 253),
            book("lhd-1969", "The Left Hand of Darkness", "Ursula K. Le Guin", 304),
            book("dune-1965", "Dune", "Frank Herbert", 412),
        ])
    }

    /// Number of `get_details` calls received.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

/// Builds a fully populated [`BookDetails`].
pub fn book(id: &str, title: &str, author: &str, page_count: u32) -> BookDetails {
    BookDetails {
        id: id.to_string(),
        title: title.to_string(),
        authors: vec![author.to_string()],
        description: format!("{title} by {author}."),
        page_count,
        categories: vec!["Fiction".to_string()],
        thumbnail: Some(format!("https://covers.example/{id}.jpg")),
        published_date: "1951".to_string(),
        average_rating: 4.0,
    }
}

#[async_trait]
impl BookCatalog for MockCatalog {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<BookSummary>, LibrisError> {
        if self.failing {
            return Err(LibrisError::catalog("catalog returned 503 Service Unavailable"));
        }
        let needle = query.to_lowercase();
        Ok(self
            .books
            .values()
            .filter(|b| {
                b.title.to_lowercase().contains(&needle)
                    || b.authors.iter().any(|a| a.to_lowercase().contains(&needle))
            })
            .take(max_results)
            .map(|b| BookSummary {
                id: b.id.clone(),
                title: b.title.clone(),
                authors: b.authors.clone(),
                thumbnail: b.thumbnail.clone(),
                short_description: b.description.clone(),
            })
            .collect())
    }

    async fn get_details(&self, id: &str) -> Result<BookDetails, LibrisError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(LibrisError::catalog("catalog returned 503 Service Unavailable"));
        }
        self.books
            .get(id)
            .cloned()
            .ok_or_else(|| LibrisError::BookNotFound(id.to_string()))
    }
}
