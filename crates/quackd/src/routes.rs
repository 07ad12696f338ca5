//! API routes for quackd

use crate::server::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use quack_common::rpc::{
    HealthResponse, LearnRequest, LearnResponse, PromptRequest, PromptResponse,
};
use std::sync::Arc;
use tracing::{debug, info};

type AppStateArc = Arc<AppState>;

// ============================================================================
// Answer Routes
// ============================================================================

pub fn answer_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/v1/ask", post(ask))
        .route("/v1/learn", post(learn))
}

async fn ask(
    State(state): State<AppStateArc>,
    Json(req): Json<PromptRequest>,
) -> Json<PromptResponse> {
    debug!("  Prompt received ({} chars)", req.prompt.len());
    Json(state.responder.respond(&req.prompt).await)
}

async fn learn(
    State(state): State<AppStateArc>,
    Json(requests): Json<Vec<LearnRequest>>,
) -> Json<LearnResponse> {
    let pairs: Vec<(String, String)> = requests
        .into_iter()
        .map(|r| (r.prompt, r.answer))
        .collect();

    let learned = state.knowledge.learn_batch(&pairs);
    info!("  Learned {} of {} submitted scenarios", learned, pairs.len());

    Json(LearnResponse {
        learned,
        message: format!("Successfully learned {} scenarios.", learned),
    })
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/health", get(health))
}

async fn health(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        scenarios_loaded: state.knowledge.len(),
    })
}
