//! Request coordinator: local match first, then the classified external
//! source, then a fixed fallback reply.
//!
//! Every prompt gets an answer. The path is blank-check, classify, local
//! match (catch-all prompts only), external fetch, and finally the no-idea
//! reply. Joke and book prompts never consult the local knowledge base.

use crate::classifier::{self, Intent};
use crate::knowledge::KnowledgeBase;
use crate::matcher;
use crate::vectorizer;
use crate::web_search::WebSearcher;
use quack_common::rpc::PromptResponse;
use std::sync::Arc;
use tracing::debug;

/// Reply for blank prompts.
pub const EMPTY_PROMPT_REPLY: &str = "You must speak for me to quack.";

/// Reply when neither the knowledge base nor any external source helped.
pub const NO_ANSWER_REPLY: &str = "Quack... I have no idea. Even the pond is silent on that one.";

/// Answers prompts; one per daemon, shared across requests.
pub struct Responder {
    knowledge: Arc<KnowledgeBase>,
    web: WebSearcher,
    /// Route taken when a catch-all prompt misses the local knowledge base.
    fallback: Intent,
}

impl Responder {
    pub fn new(knowledge: Arc<KnowledgeBase>, web: WebSearcher, fallback: Intent) -> Self {
        Self {
            knowledge,
            web,
            fallback,
        }
    }

    /// Answer a prompt. Always produces a reply; the provenance tag says
    /// whether it came from learned knowledge or an external source.
    pub async fn respond(&self, prompt: &str) -> PromptResponse {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return PromptResponse::local(EMPTY_PROMPT_REPLY);
        }

        let intent = classifier::classify(prompt);
        let route = match intent {
            Intent::Knowledge => {
                let terms = vectorizer::vectorize(prompt);
                let snapshot = self.knowledge.snapshot();
                if let Some(hit) = matcher::find_best_match(&terms, &snapshot) {
                    debug!("Local match against stored prompt '{}'", hit.prompt);
                    return PromptResponse::local(hit.answer.clone());
                }
                debug!("No local match, falling through to external lookup");
                self.fallback
            }
            other => other,
        };

        match self.web.search(route, prompt).await {
            Some(reply) => PromptResponse::internet(reply),
            None => PromptResponse::local(NO_ANSWER_REPLY),
        }
    }
}
