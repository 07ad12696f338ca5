//! Prompt intent classification.
//!
//! Ordered case-insensitive substring rules; the first match wins, so the
//! joke rule is checked before the book rule and "a funny book" routes to
//! the joke source. Prompts that match no rule are the catch-all knowledge
//! category, the only one the local scenario base is consulted for.

/// Coarse intent of a prompt, used to pick an answer route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Wants a joke; goes straight to the joke source.
    Joke,
    /// Asks about a book; goes straight to the book search source.
    Book,
    /// Catch-all: local knowledge base first, then the general lookup.
    Knowledge,
    /// Nothing to classify (blank input).
    Unknown,
}

/// Classify a prompt into an [`Intent`].
pub fn classify(prompt: &str) -> Intent {
    let p = prompt.trim().to_lowercase();
    if p.is_empty() {
        return Intent::Unknown;
    }

    if p.contains("joke") || p.contains("funny") || p.starts_with("tell me a") {
        return Intent::Joke;
    }

    if p.contains("book") || p.contains("author") || p.contains("novel") {
        return Intent::Book;
    }

    Intent::Knowledge
}
