// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the Google Books `volumes` API.
//!
//! Every field the API may omit is optional here; placeholder substitution
//! happens when converting to the core book types.

use serde::Deserialize;

/// Response of `GET /volumes?q=...`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeList {
    #[serde(default)]
    pub total_items: u32,
    /// Absent when the query has no hits.
    #[serde(default)]
    pub items: Vec<Volume>,
}

/// A single volume, as returned by both search and lookup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub volume_info: VolumeInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub description: Option<String>,
    pub page_count: Option<u32>,
    pub categories: Option<Vec<String>>,
    pub image_links: Option<ImageLinks>,
    pub published_date: Option<String>,
    pub average_rating: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    pub thumbnail: Option<String>,
    pub small_thumbnail: Option<String>,
}

impl ImageLinks {
    /// Preferred thumbnail URL, upgraded to HTTPS.
    pub fn best(&self) -> Option<String> {
        self.thumbnail
            .as_deref()
            .or(self.small_thumbnail.as_deref())
            .map(|url| match url.strip_prefix("http://") {
                Some(rest) => format!("https://{rest}"),
                None => url.to_string(),
            })
    }
}
