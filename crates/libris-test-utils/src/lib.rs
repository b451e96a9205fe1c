// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Libris integration tests.
//!
//! - [`MockProvider`]: scripted LLM replies with request recording
//! - [`MockCatalog`]: in-memory book catalog
//! - [`TestHarness`]: the full chat stack over a temp database

pub mod harness;
pub mod mock_catalog;
pub mod mock_provider;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_catalog::{MockCatalog, book};
pub use mock_provider::MockProvider;
