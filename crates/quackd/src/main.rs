//! Quack Daemon - duck-flavored question answering.
//!
//! Answers prompts from learned scenarios, falling back to public
//! encyclopedia, joke, and book APIs for everything the pond has not
//! taught it yet.

use anyhow::{Context, Result};
use quackd::config::Config;
use quackd::knowledge::KnowledgeBase;
use quackd::responder::Responder;
use quackd::server::{self, AppState};
use quackd::store::SqliteScenarioStore;
use quackd::web_search::WebSearcher;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Scenarios inserted on first run so a fresh install can answer something.
const DEFAULT_SCENARIOS: &[(&str, &str)] = &[
    ("What is a duck?", "Only the smartest bird."),
    ("Hello", "Hi there!"),
    (
        "Who are you?",
        "A very clever duck with an internet connection. Quack.",
    ),
    (
        "What do ducks eat?",
        "Pondweed, seeds, and any breadcrumb that lets its guard down.",
    ),
];

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("quackd v{} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::load();

    let store = Arc::new(
        SqliteScenarioStore::open(&config.store.db_path)
            .context("failed to open scenario store")?,
    );
    let seeded = store.seed_if_empty(DEFAULT_SCENARIOS)?;
    if seeded > 0 {
        info!("Seeded {} default scenarios", seeded);
    }

    let knowledge = Arc::new(KnowledgeBase::new(store));
    match knowledge.reload() {
        Ok(count) => info!("Knowledge base ready with {} scenarios", count),
        Err(e) => warn!(
            "Initial scenario load failed, serving with an empty knowledge base: {:#}",
            e
        ),
    }
    spawn_reload_task(knowledge.clone(), config.engine.reload_interval_ms);

    let web = WebSearcher::new(config.web.clone()).context("failed to build web searcher")?;
    let responder = Responder::new(
        knowledge.clone(),
        web,
        config.engine.fallback_source.as_intent(),
    );

    let state = AppState::new(responder, knowledge);
    server::run(state, &config.server.listen_addr).await
}

/// Periodically rebuild the scenario snapshot from the store, so edits
/// made directly to the database show up without a restart.
fn spawn_reload_task(knowledge: Arc<KnowledgeBase>, interval_ms: u64) {
    // tokio intervals panic on a zero period.
    let period = Duration::from_millis(interval_ms.max(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // The first tick fires immediately; boot already loaded.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if let Err(e) = knowledge.reload() {
                warn!("Scheduled scenario reload failed: {:#}", e);
            }
        }
    });
}
