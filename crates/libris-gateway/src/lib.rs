// SPDX-FileCopyrightText: 2026 Libris Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Libris reading companion.
//!
//! Exposes the chat orchestrator at `POST /chat`, a health probe, and
//! read-only JSON views of the reading list. No authentication: the gateway
//! is meant to sit behind the web client on a trusted host.

pub mod handlers;
pub mod server;

pub use server::{GatewayState, ServerConfig, build_router, start_server};

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use libris_test_utils::TestHarness;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    fn state(harness: &TestHarness) -> GatewayState {
        GatewayState {
            orchestrator: harness.orchestrator.clone(),
            reading_list: harness.reading_list.clone(),
            max_input_chars: 2000,
            start_time: Instant::now(),
        }
    }

    async fn send(harness: &TestHarness, request: Request<Body>) -> (StatusCode, Value) {
        let response = build_router(state(harness)).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_chat(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/chat")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn chat_returns_content_and_tools_used() {
        let harness = TestHarness::builder().build().await.unwrap();
        harness
            .provider
            .push_tool_calls(vec![("call_1", "searchBooks", json!({"query": "Asimov"}))])
            .await;
        harness
            .provider
            .push_text("Te recomiendo Foundation y I, Robot.")
            .await;

        let (status, body) = send(
            &harness,
            post_chat(json!({"messages": [{"role": "user", "content": "Busca libros de Asimov"}]})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["content"], "Te recomiendo Foundation y I, Robot.");
        assert_eq!(body["toolsUsed"], json!(["searchBooks"]));
    }

    #[tokio::test]
    async fn chat_rejects_empty_and_oversized_input() {
        let harness = TestHarness::builder().build().await.unwrap();

        let (status, body) = send(&harness, post_chat(json!({"messages": []}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "messages must not be empty");

        let long = "a".repeat(2001);
        let (status, _) = send(
            &harness,
            post_chat(json!({"messages": [{"role": "user", "content": long}]})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&harness, post_chat(json!({"nope": true}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        assert_eq!(harness.provider.call_count().await, 0);
    }

    #[tokio::test]
    async fn provider_failure_is_generic_500() {
        let harness = TestHarness::builder().build().await.unwrap();
        harness.provider.push_failure("API returned 401: bad key").await;

        let (status, body) = send(
            &harness,
            post_chat(json!({"messages": [{"role": "user", "content": "hola"}]})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "internal error"}));
    }

    #[tokio::test]
    async fn health_reports_storage() {
        let harness = TestHarness::builder().build().await.unwrap();
        let (status, body) = send(&harness, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage"], "healthy");
        assert!(body["uptimeSecs"].is_u64());
    }

    #[tokio::test]
    async fn reading_list_views_reflect_store() {
        let harness = TestHarness::builder().build().await.unwrap();
        harness
            .reading_list
            .add_pending("dune-1965", None, None)
            .await
            .unwrap();
        harness
            .reading_list
            .mark_read("fdn-1951", Some(5), None)
            .await
            .unwrap();

        let (status, body) = send(&harness, get("/v1/reading-list?limit=5")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["items"][0]["externalId"], "dune-1965");

        let (_, body) = send(&harness, get("/v1/read")).await;
        assert_eq!(body["items"][0]["externalId"], "fdn-1951");

        let (status, body) = send(&harness, get("/v1/stats?period=month")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalRead"], 1);
        assert_eq!(body["period"], "month");

        let (status, _) = send(&harness, get("/v1/stats?period=decade")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
