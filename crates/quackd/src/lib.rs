//! Quack daemon library - exposes modules for testing.

pub mod classifier;
pub mod config;
pub mod knowledge;
pub mod matcher;
pub mod rate_limit;
pub mod responder;
pub mod routes;
pub mod server;
pub mod similarity;
pub mod store;
pub mod vectorizer;
pub mod web_search;
