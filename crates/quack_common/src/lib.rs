//! Shared types for the Quack assistant.
//!
//! Request and response shapes exchanged between the `quackd` daemon and
//! its clients, kept in one place so both sides agree on the wire format.

pub mod rpc;

pub use rpc::{
    AnswerSource, HealthResponse, LearnRequest, LearnResponse, PromptRequest, PromptResponse,
};

/// Default address the daemon listens on (loopback only).
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:7843";
