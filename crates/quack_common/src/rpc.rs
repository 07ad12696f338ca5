//! API request/response types for the quackd HTTP interface.

use serde::{Deserialize, Serialize};

/// Where an answer came from.
///
/// Every reply carries one of these, including the fixed fallback replies,
/// so clients can always tell learned knowledge from fetched content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
    /// Answered from the local scenario knowledge base.
    Local,
    /// Answered by an external content source.
    Internet,
}

/// A free-text prompt for the assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptRequest {
    pub prompt: String,
}

/// The assistant's reply, tagged with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptResponse {
    pub reply: String,
    pub source: AnswerSource,
}

impl PromptResponse {
    /// Reply drawn from the local knowledge base.
    pub fn local(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            source: AnswerSource::Local,
        }
    }

    /// Reply fetched from an external source.
    pub fn internet(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            source: AnswerSource::Internet,
        }
    }
}

/// One scenario to learn: a prompt and the answer to give for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnRequest {
    pub prompt: String,
    pub answer: String,
}

/// Outcome of a batch learn call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnResponse {
    /// How many of the submitted scenarios were accepted.
    pub learned: usize,
    pub message: String,
}

/// Daemon health summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    /// Size of the in-memory scenario snapshot.
    pub scenarios_loaded: usize,
}
