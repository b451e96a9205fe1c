// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `libris serve` implementation.
//!
//! Opens the database, wires the catalog, reading list, tools, provider, and
//! orchestrator together, and serves the gateway until a shutdown signal.

use std::sync::Arc;
use std::time::Instant;

use libris_agent::shutdown::install_signal_handler;
use libris_agent::{ChatOrchestrator, load_system_prompt};
use libris_books::GoogleBooksClient;
use libris_config::LibrisConfig;
use libris_core::{BookCatalog, LibrisError, ProviderAdapter};
use libris_gateway::{GatewayState, ServerConfig, start_server};
use libris_openai::OpenAiProvider;
use libris_skill::{ToolDispatcher, ToolRegistry, register_builtins};
use libris_storage::{Database, ReadingList};
use tracing::{error, info};

/// Runs the server until SIGINT/SIGTERM, then closes the database.
pub async fn run_serve(config: LibrisConfig) -> Result<(), LibrisError> {
    info!(version = env!("CARGO_PKG_VERSION"), "starting libris");

    let db = Arc::new(
        Database::open_with(&config.storage.database_path, config.storage.wal_mode).await?,
    );

    let catalog: Arc<dyn BookCatalog> = Arc::new(GoogleBooksClient::new(&config.books)?);
    let reading_list = Arc::new(ReadingList::new(db.clone(), catalog.clone()));

    let mut registry = ToolRegistry::new();
    register_builtins(&mut registry, catalog, reading_list.clone());
    info!(tools = ?registry.names(), "tools registered");
    let dispatcher = Arc::new(ToolDispatcher::new(Arc::new(registry))?);

    let provider: Arc<dyn ProviderAdapter> = Arc::new(OpenAiProvider::new(&config.llm)?);
    let system_prompt = load_system_prompt(&config.agent).await;
    let orchestrator = Arc::new(ChatOrchestrator::new(
        provider,
        dispatcher,
        system_prompt,
        config.llm.temperature,
    ));

    let state = GatewayState {
        orchestrator,
        reading_list,
        max_input_chars: config.server.max_input_chars,
        start_time: Instant::now(),
    };
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };

    let shutdown = install_signal_handler();
    let served = start_server(&server_config, state, shutdown).await;

    if let Err(e) = db.close().await {
        error!(error = %e, "failed to close database cleanly");
    }
    info!("libris stopped");
    served
}

/// Initialize the tracing subscriber. `RUST_LOG` overrides the config level.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("libris={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
