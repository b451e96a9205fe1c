// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway.
//!
//! Handles POST /chat, GET /health, and the read-only reading-list views.

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use libris_core::{HealthStatus, LibrisError, Message, Role, StatsPeriod};
use serde::{Deserialize, Serialize};
use tracing::{Instrument, error, info_span, warn};

use crate::server::GatewayState;

const DEFAULT_LIST_LIMIT: u32 = 20;
const MAX_LIST_LIMIT: u32 = 100;

/// Request body for POST /chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// "ok" or "degraded".
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    /// "healthy" or "unhealthy: <reason>".
    pub storage: String,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

/// Maps an error to a response. Only request validation errors leak detail.
fn failure(err: LibrisError) -> Response {
    match err {
        LibrisError::InvalidRequest(message) => error_response(StatusCode::BAD_REQUEST, message),
        other => {
            error!(error = %other, "request failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
    }
}

/// Rejects empty histories and oversized user messages.
fn validate_messages(messages: &[Message], max_input_chars: usize) -> Result<(), LibrisError> {
    if messages.is_empty() {
        return Err(LibrisError::InvalidRequest(
            "messages must not be empty".into(),
        ));
    }
    let too_long = messages
        .iter()
        .filter(|m| m.role == Role::User)
        .any(|m| m.content.chars().count() > max_input_chars);
    if too_long {
        return Err(LibrisError::InvalidRequest(format!(
            "message exceeds {max_input_chars} characters"
        )));
    }
    Ok(())
}

/// POST /chat
///
/// Runs the two-pass orchestration for the given history and returns
/// `{content, toolsUsed}`.
pub async fn post_chat(
    State(state): State<GatewayState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!(error = %rejection, "malformed chat request");
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    if let Err(e) = validate_messages(&body.messages, state.max_input_chars) {
        return failure(e);
    }

    let request_id = uuid::Uuid::new_v4().to_string();
    let span = info_span!("chat", %request_id, messages = body.messages.len());
    match state
        .orchestrator
        .handle(body.messages)
        .instrument(span)
        .await
    {
        Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
        Err(e) => failure(e),
    }
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    let storage = match state.reading_list.database().health_check().await {
        Ok(HealthStatus::Healthy) => "healthy".to_string(),
        Ok(HealthStatus::Unhealthy(reason)) => format!("unhealthy: {reason}"),
        Err(e) => format!("unhealthy: {e}"),
    };
    let status = if storage == "healthy" { "ok" } else { "degraded" };
    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        storage,
    })
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<u32>,
}

impl LimitQuery {
    fn resolved(&self) -> u32 {
        self.limit
            .unwrap_or(DEFAULT_LIST_LIMIT)
            .clamp(1, MAX_LIST_LIMIT)
    }
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    #[serde(default)]
    pub period: StatsPeriod,
}

/// GET /v1/reading-list
pub async fn get_reading_list(
    State(state): State<GatewayState>,
    Query(query): Query<LimitQuery>,
) -> Response {
    match state.reading_list.list_pending(query.resolved()).await {
        Ok(items) => Json(serde_json::json!({ "items": items })).into_response(),
        Err(e) => failure(e),
    }
}

/// GET /v1/read
pub async fn get_read_books(
    State(state): State<GatewayState>,
    Query(query): Query<LimitQuery>,
) -> Response {
    match state.reading_list.list_read(query.resolved()).await {
        Ok(items) => Json(serde_json::json!({ "items": items })).into_response(),
        Err(e) => failure(e),
    }
}

/// GET /v1/stats
pub async fn get_stats(
    State(state): State<GatewayState>,
    Query(query): Query<StatsQuery>,
) -> Response {
    match state.reading_list.stats(query.period).await {
        Ok(stats) => Json(stats).into_response(),
        Err(e) => failure(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_history_is_rejected() {
        assert!(matches!(
            validate_messages(&[], 10),
            Err(LibrisError::InvalidRequest(_))
        ));
    }

    #[test]
    fn length_limit_counts_chars_of_user_messages_only() {
        let ok = vec![Message::user("ñññññ"), Message::assistant("x".repeat(50))];
        assert!(validate_messages(&ok, 5).is_ok());

        let too_long = vec![Message::user("abcdef")];
        let err = validate_messages(&too_long, 5).unwrap_err();
        assert_eq!(err.to_string(), "invalid request: message exceeds 5 characters");
    }

    #[test]
    fn list_limit_is_clamped() {
        assert_eq!(LimitQuery { limit: None }.resolved(), 20);
        assert_eq!(LimitQuery { limit: Some(0) }.resolved(), 1);
        assert_eq!(LimitQuery { limit: Some(500) }.resolved(), 100);
    }
}
