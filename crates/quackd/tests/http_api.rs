//! HTTP API tests driven through the in-process router.
//!
//! No sockets are bound: requests go through `tower::ServiceExt::oneshot`
//! against the same router the daemon serves. The web searcher points at
//! an unreachable loopback port, so external routes deterministically
//! degrade and every reply here is locally sourced.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use quack_common::rpc::{AnswerSource, HealthResponse, LearnResponse, PromptResponse};
use quackd::classifier::Intent;
use quackd::config::WebConfig;
use quackd::knowledge::KnowledgeBase;
use quackd::responder::{Responder, EMPTY_PROMPT_REPLY, NO_ANSWER_REPLY};
use quackd::server::{app, AppState};
use quackd::store::MemoryScenarioStore;
use quackd::web_search::WebSearcher;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

// ============================================================================
// Harness
// ============================================================================

fn test_app(pairs: &[(&str, &str)]) -> axum::Router {
    let store = Arc::new(MemoryScenarioStore::with_scenarios(pairs));
    let knowledge = Arc::new(KnowledgeBase::new(store));
    knowledge.reload().unwrap();

    let web = WebSearcher::new(WebConfig {
        connect_timeout_ms: 300,
        request_timeout_ms: 300,
        min_request_interval_ms: 0,
        wiki_summary_url: "http://127.0.0.1:9/wiki/".to_string(),
        joke_url: "http://127.0.0.1:9/joke".to_string(),
        book_search_url: "http://127.0.0.1:9/book?q=".to_string(),
        ..WebConfig::default()
    })
    .unwrap();

    let responder = Responder::new(knowledge.clone(), web, Intent::Knowledge);
    app(Arc::new(AppState::new(responder, knowledge)))
}

async fn post_json(router: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn get_json(router: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

// ============================================================================
// /v1/ask
// ============================================================================

#[tokio::test]
async fn test_ask_returns_local_match() {
    let router = test_app(&[("What is a duck?", "Only the smartest bird.")]);

    let (status, body) = post_json(
        router,
        "/v1/ask",
        json!({"prompt": "What is a duck?"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let response: PromptResponse = serde_json::from_value(body).unwrap();
    assert_eq!(response.reply, "Only the smartest bird.");
    assert_eq!(response.source, AnswerSource::Local);
}

#[tokio::test]
async fn test_ask_blank_prompt_gets_fixed_reply() {
    let router = test_app(&[]);

    let (status, body) = post_json(router, "/v1/ask", json!({"prompt": "  "})).await;

    assert_eq!(status, StatusCode::OK);
    let response: PromptResponse = serde_json::from_value(body).unwrap();
    assert_eq!(response.reply, EMPTY_PROMPT_REPLY);
    assert_eq!(response.source, AnswerSource::Local);
}

#[tokio::test]
async fn test_ask_unanswerable_prompt_degrades() {
    let router = test_app(&[("Hello", "Hi there!")]);

    let (status, body) = post_json(
        router,
        "/v1/ask",
        json!({"prompt": "Explain quantum chromodynamics"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let response: PromptResponse = serde_json::from_value(body).unwrap();
    assert_eq!(response.reply, NO_ANSWER_REPLY);
    assert_eq!(response.source, AnswerSource::Local);
}

#[tokio::test]
async fn test_ask_rejects_malformed_body() {
    let router = test_app(&[]);
    let (status, _) = post_json(router, "/v1/ask", json!({"wrong_field": 1})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

// ============================================================================
// /v1/learn
// ============================================================================

#[tokio::test]
async fn test_learn_batch_reports_accepted_count() {
    let router = test_app(&[]);

    let (status, body) = post_json(
        router,
        "/v1/learn",
        json!([
            {"prompt": "What is rain?", "answer": "Duck weather."},
            {"prompt": "", "answer": "rejected"},
            {"prompt": "Hello", "answer": "Hi there!"}
        ]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let response: LearnResponse = serde_json::from_value(body).unwrap();
    assert_eq!(response.learned, 2);
    assert_eq!(response.message, "Successfully learned 2 scenarios.");
}

#[tokio::test]
async fn test_learned_scenario_is_askable_in_same_session() {
    let router = test_app(&[]);

    let (status, _) = post_json(
        router.clone(),
        "/v1/learn",
        json!([{"prompt": "What is rain?", "answer": "Duck weather."}]),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = post_json(router, "/v1/ask", json!({"prompt": "What is rain?"})).await;
    let response: PromptResponse = serde_json::from_value(body).unwrap();
    assert_eq!(response.reply, "Duck weather.");
    assert_eq!(response.source, AnswerSource::Local);
}

#[tokio::test]
async fn test_learn_empty_batch_learns_nothing() {
    let router = test_app(&[]);
    let (status, body) = post_json(router, "/v1/learn", json!([])).await;
    assert_eq!(status, StatusCode::OK);
    let response: LearnResponse = serde_json::from_value(body).unwrap();
    assert_eq!(response.learned, 0);
}

// ============================================================================
// /v1/health
// ============================================================================

#[tokio::test]
async fn test_health_reports_scenario_count() {
    let router = test_app(&[("Hello", "Hi there!"), ("Bye", "Quack.")]);

    let (status, body) = get_json(router, "/v1/health").await;

    assert_eq!(status, StatusCode::OK);
    let health: HealthResponse = serde_json::from_value(body).unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.scenarios_loaded, 2);
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}
