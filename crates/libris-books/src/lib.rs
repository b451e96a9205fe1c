// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Book catalog client for the Libris reading companion.
//!
//! Implements [`libris_core::BookCatalog`] over the Google Books `volumes`
//! API with id filtering, description truncation, and placeholder values.

pub mod client;
pub mod types;

pub use client::GoogleBooksClient;
