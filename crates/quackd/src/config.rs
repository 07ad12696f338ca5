//! Configuration management for quackd.
//!
//! Loads settings from /etc/quack/config.toml or uses defaults. Every
//! field has a default, so a partial file works.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::classifier::Intent;

/// Config file path
pub const CONFIG_PATH: &str = "/etc/quack/config.toml";

/// Default config file path for fallback
pub const DEFAULT_CONFIG_PATH: &str = "/var/lib/quack/config.toml";

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address; loopback only by default
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

fn default_listen_addr() -> String {
    quack_common::DEFAULT_LISTEN_ADDR.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

/// Scenario store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SQLite database holding learned scenarios
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("/var/lib/quack/scenarios.db")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

/// External source consulted when a catch-all prompt misses the local
/// knowledge base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackSource {
    #[default]
    Wiki,
    Joke,
    Book,
}

impl FallbackSource {
    /// Route the fallthrough takes through the web searcher.
    pub fn as_intent(self) -> Intent {
        match self {
            FallbackSource::Wiki => Intent::Knowledge,
            FallbackSource::Joke => Intent::Joke,
            FallbackSource::Book => Intent::Book,
        }
    }
}

/// Match engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// How often the scenario snapshot is rebuilt from the store
    #[serde(default = "default_reload_interval_ms")]
    pub reload_interval_ms: u64,

    /// Source used when a knowledge prompt has no local match
    #[serde(default)]
    pub fallback_source: FallbackSource,
}

fn default_reload_interval_ms() -> u64 {
    300_000 // 5 minutes
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reload_interval_ms: default_reload_interval_ms(),
            fallback_source: FallbackSource::default(),
        }
    }
}

/// Outbound HTTP configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// User-Agent sent to the public APIs
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// TCP connect timeout in milliseconds
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Whole-request timeout in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Minimum spacing between outbound calls, shared by all sources
    #[serde(default = "default_min_request_interval_ms")]
    pub min_request_interval_ms: u64,

    /// Encyclopedia summary endpoint; the topic is appended
    #[serde(default = "default_wiki_summary_url")]
    pub wiki_summary_url: String,

    /// Random joke endpoint
    #[serde(default = "default_joke_url")]
    pub joke_url: String,

    /// Book search endpoint; the query is appended
    #[serde(default = "default_book_search_url")]
    pub book_search_url: String,

    /// Book cover image base URL; the cover id is appended
    #[serde(default = "default_book_cover_url")]
    pub book_cover_url: String,
}

fn default_user_agent() -> String {
    format!(
        "quackd/{} (+https://github.com/quackdev/quack)",
        env!("CARGO_PKG_VERSION")
    )
}

fn default_connect_timeout_ms() -> u64 {
    3_000
}

fn default_request_timeout_ms() -> u64 {
    5_000
}

fn default_min_request_interval_ms() -> u64 {
    1_000 // polite pacing for public endpoints
}

fn default_wiki_summary_url() -> String {
    "https://en.wikipedia.org/api/rest_v1/page/summary/".to_string()
}

fn default_joke_url() -> String {
    "https://v2.jokeapi.dev/joke/Any?safe-mode".to_string()
}

fn default_book_search_url() -> String {
    "https://openlibrary.org/search.json?q=".to_string()
}

fn default_book_cover_url() -> String {
    "https://covers.openlibrary.org/b/id/".to_string()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            connect_timeout_ms: default_connect_timeout_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            min_request_interval_ms: default_min_request_interval_ms(),
            wiki_summary_url: default_wiki_summary_url(),
            joke_url: default_joke_url(),
            book_search_url: default_book_search_url(),
            book_cover_url: default_book_cover_url(),
        }
    }
}

/// Full daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub web: WebConfig,
}

impl Config {
    /// Load config from file, or return defaults
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_PATH)
            .or_else(|_| Self::load_from_path(DEFAULT_CONFIG_PATH))
            .unwrap_or_else(|e| {
                warn!("Config not found, using defaults: {}", e);
                Config::default()
            })
    }

    /// Load config from specific path
    fn load_from_path(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!("Loaded config from {}", path);
        Ok(config)
    }
}
