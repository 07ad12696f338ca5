//! HTTP server for quackd

use crate::knowledge::KnowledgeBase;
use crate::responder::Responder;
use crate::routes;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers
pub struct AppState {
    pub responder: Responder,
    pub knowledge: Arc<KnowledgeBase>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(responder: Responder, knowledge: Arc<KnowledgeBase>) -> Self {
        Self {
            responder,
            knowledge,
            start_time: Instant::now(),
        }
    }
}

/// Build the full API router.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::answer_routes())
        .merge(routes::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until shutdown.
pub async fn run(state: AppState, addr: &str) -> Result<()> {
    let app = app(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("  Listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
