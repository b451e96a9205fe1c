// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles the full chat stack (temp SQLite database,
//! reading list, six built-in tools, dispatcher, orchestrator) around a
//! [`MockProvider`] and a [`MockCatalog`].

use std::sync::Arc;

use libris_agent::{ChatOrchestrator, ChatReply};
use libris_core::{BookCatalog, LibrisError, Message};
use libris_skill::{ToolDispatcher, ToolRegistry, register_builtins};
use libris_storage::{Database, ReadingList};

use crate::mock_catalog::MockCatalog;
use crate::mock_provider::MockProvider;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    catalog: MockCatalog,
    system_prompt: String,
    temperature: f32,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            catalog: MockCatalog::classics(),
            system_prompt: "You are a test librarian.".to_string(),
            temperature: 0.7,
        }
    }

    /// Replace the default classics catalog.
    pub fn with_catalog(mut self, catalog: MockCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Build the harness, creating every subsystem.
    pub async fn build(self) -> Result<TestHarness, LibrisError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| LibrisError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");
        let db = Arc::new(Database::open(&db_path.to_string_lossy()).await?);

        let catalog: Arc<dyn BookCatalog> = Arc::new(self.catalog.clone());
        let reading_list = Arc::new(ReadingList::new(db.clone(), catalog.clone()));

        let mut registry = ToolRegistry::new();
        register_builtins(&mut registry, catalog, reading_list.clone());
        let dispatcher = Arc::new(ToolDispatcher::new(Arc::new(registry))?);

        let provider = MockProvider::new();
        let orchestrator = Arc::new(ChatOrchestrator::new(
            Arc::new(provider.clone()),
            dispatcher.clone(),
            self.system_prompt,
            self.temperature,
        ));

        Ok(TestHarness {
            provider,
            catalog: self.catalog,
            db,
            reading_list,
            dispatcher,
            orchestrator,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete Libris stack for integration tests.
///
/// The temp directory is removed when the harness is dropped.
pub struct TestHarness {
    pub provider: MockProvider,
    pub catalog: MockCatalog,
    pub db: Arc<Database>,
    pub reading_list: Arc<ReadingList>,
    pub dispatcher: Arc<ToolDispatcher>,
    pub orchestrator: Arc<ChatOrchestrator>,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Sends a single user message through the orchestrator.
    pub async fn chat(&self, text: &str) -> Result<ChatReply, LibrisError> {
        self.orchestrator.handle(vec![Message::user(text)]).await
    }
}
