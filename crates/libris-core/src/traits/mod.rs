// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions.
//!
//! Both traits use `#[async_trait]` so implementations can be held as
//! `Arc<dyn ...>` and swapped for mocks in tests.

pub mod catalog;
pub mod provider;

pub use catalog::BookCatalog;
pub use provider::ProviderAdapter;
