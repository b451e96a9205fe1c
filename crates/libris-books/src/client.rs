// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Google Books `volumes` API.
//!
//! Provides [`GoogleBooksClient`], a read-only [`BookCatalog`]. Requests are
//! never retried; every failure comes back as a [`LibrisError`].

use std::time::Duration;

use async_trait::async_trait;
use libris_config::model::BooksConfig;
use libris_core::{BookCatalog, BookDetails, BookSummary, LibrisError};
use regex::Regex;
use reqwest::{StatusCode, Url};
use tracing::{debug, warn};

use crate::types::{Volume, VolumeList};

/// Largest page size the volumes endpoint accepts.
pub const MAX_PAGE_SIZE: usize = 40;

const UNKNOWN_AUTHOR: &str = "Unknown author";
const NO_DESCRIPTION: &str = "No description available";
const UNKNOWN_DATE: &str = "Unknown";

/// Catalog client for Google Books.
#[derive(Debug, Clone)]
pub struct GoogleBooksClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    description_chars: usize,
    blocked_ids: Vec<Regex>,
}

impl GoogleBooksClient {
    /// Builds a client from the `[books]` config section.
    ///
    /// Fails when a blocked-id pattern is not a valid regex.
    pub fn new(config: &BooksConfig) -> Result<Self, LibrisError> {
        let blocked_ids = config
            .blocked_id_patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| {
                    LibrisError::Config(format!("invalid blocked id pattern `{pattern}`: {e}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LibrisError::Catalog {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            description_chars: config.description_chars,
            blocked_ids,
        })
    }

    /// True when `id` is empty or matches one of the blocked patterns.
    pub fn is_blocked(&self, id: &str) -> bool {
        id.is_empty() || self.blocked_ids.iter().any(|re| re.is_match(id))
    }

    fn volumes_url(&self, id: Option<&str>) -> Result<Url, LibrisError> {
        let mut url = Url::parse(&format!("{}/volumes", self.base_url)).map_err(|e| {
            LibrisError::Catalog {
                message: format!("invalid catalog base URL: {e}"),
                source: Some(Box::new(e)),
            }
        })?;
        if let Some(id) = id {
            url.path_segments_mut()
                .map_err(|()| LibrisError::catalog("catalog base URL cannot take a path"))?
                .push(id);
        }
        if let Some(key) = &self.api_key {
            url.query_pairs_mut().append_pair("key", key);
        }
        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response, LibrisError> {
        self.client
            .get(url)
            .send()
            .await
            .map_err(|e| LibrisError::Catalog {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })
    }

    fn summarize(&self, volume: Volume) -> Option<BookSummary> {
        let id = volume.id.filter(|id| !self.is_blocked(id))?;
        let info = volume.volume_info;
        let title = info.title.filter(|t| !t.trim().is_empty())?;
        Some(BookSummary {
            id,
            title,
            authors: authors_or_placeholder(info.authors),
            thumbnail: info.image_links.as_ref().and_then(|l| l.best()),
            short_description: truncate_chars(
                info.description.as_deref().unwrap_or(NO_DESCRIPTION),
                self.description_chars,
            ),
        })
    }
}

#[async_trait]
impl BookCatalog for GoogleBooksClient {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<BookSummary>, LibrisError> {
        let query = query.trim();
        let max_results = max_results.clamp(1, MAX_PAGE_SIZE);
        if query.is_empty() {
            return Ok(Vec::new());
        }

        // Over-fetch so that filtering still leaves `max_results` hits.
        let raw = (max_results * 2).min(MAX_PAGE_SIZE);
        let mut url = self.volumes_url(None)?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("maxResults", &raw.to_string());

        let response = self.get(url).await?;
        let status = response.status();
        debug!(status = %status, query, raw, "catalog search response received");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "catalog search failed");
            return Err(LibrisError::catalog(format!("catalog returned {status}")));
        }

        let list: VolumeList = response.json().await.map_err(|e| LibrisError::Catalog {
            message: format!("failed to parse search response: {e}"),
            source: Some(Box::new(e)),
        })?;

        let fetched = list.items.len();
        let books: Vec<BookSummary> = list
            .items
            .into_iter()
            .filter_map(|volume| self.summarize(volume))
            .take(max_results)
            .collect();
        debug!(fetched, kept = books.len(), total = list.total_items, "search results filtered");
        Ok(books)
    }

    async fn get_details(&self, id: &str) -> Result<BookDetails, LibrisError> {
        if self.is_blocked(id) {
            debug!(id, "refusing lookup of blocked id");
            return Err(LibrisError::BookNotFound(id.to_string()));
        }

        let response = self.get(self.volumes_url(Some(id))?).await?;
        let status = response.status();
        debug!(status = %status, id, "catalog lookup response received");
        if status == StatusCode::NOT_FOUND {
            return Err(LibrisError::BookNotFound(id.to_string()));
        }
        if !status.is_success() {
            return Err(LibrisError::catalog(format!("catalog returned {status}")));
        }

        let volume: Volume = match response.json().await {
            Ok(volume) => volume,
            Err(e) => {
                debug!(id, error = %e, "unusable catalog record");
                return Err(LibrisError::BookNotFound(id.to_string()));
            }
        };
        let info = volume.volume_info;
        let Some(title) = info.title.filter(|t| !t.trim().is_empty()) else {
            return Err(LibrisError::BookNotFound(id.to_string()));
        };

        Ok(BookDetails {
            id: volume.id.unwrap_or_else(|| id.to_string()),
            title,
            authors: authors_or_placeholder(info.authors),
            description: info
                .description
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            page_count: info.page_count.unwrap_or(0),
            categories: info.categories.unwrap_or_default(),
            thumbnail: info.image_links.as_ref().and_then(|l| l.best()),
            published_date: info
                .published_date
                .unwrap_or_else(|| UNKNOWN_DATE.to_string()),
            average_rating: info.average_rating.unwrap_or(0.0),
        })
    }
}

fn authors_or_placeholder(authors: Option<Vec<String>>) -> Vec<String> {
    match authors {
        Some(authors) if !authors.is_empty() => authors,
        _ => vec![UNKNOWN_AUTHOR.to_string()],
    }
}

/// Truncates to `budget` characters, appending `...` when shortened.
fn truncate_chars(text: &str, budget: usize) -> String {
    if text.chars().count() <= budget {
        return text.to_string();
    }
    let cut: String = text.chars().take(budget).collect();
    format!("{}...", cut.trim_end())
}
