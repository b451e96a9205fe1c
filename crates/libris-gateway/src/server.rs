// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router,
    routing::{get, post},
};
use libris_agent::ChatOrchestrator;
use libris_core::LibrisError;
use libris_storage::ReadingList;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub orchestrator: Arc<ChatOrchestrator>,
    pub reading_list: Arc<ReadingList>,
    /// Longest accepted user message, in characters.
    pub max_input_chars: usize,
    /// Process start time for uptime calculation.
    pub start_time: Instant,
}

/// Bind address (mirrors `[server]` from libris-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Builds the router with every route and middleware layer.
///
/// - `POST /chat`
/// - `GET /health`
/// - `GET /v1/reading-list`, `GET /v1/read`, `GET /v1/stats`
pub fn build_router(state: GatewayState) -> Router {
    let api_routes = Router::new()
        .route("/v1/reading-list", get(handlers::get_reading_list))
        .route("/v1/read", get(handlers::get_read_books))
        .route("/v1/stats", get(handlers::get_stats));

    Router::new()
        .route("/chat", post(handlers::post_chat))
        .route("/health", get(handlers::get_health))
        .merge(api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Serves the gateway until `shutdown` is cancelled.
///
/// In-flight requests are allowed to finish before this returns.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    shutdown: CancellationToken,
) -> Result<(), LibrisError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| LibrisError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| LibrisError::Internal(format!("gateway server error: {e}")))?;

    info!("Gateway server stopped");
    Ok(())
}
