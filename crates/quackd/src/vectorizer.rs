//! Prompt vectorization.
//!
//! Turns free text into a sparse bag-of-words term-frequency map for
//! similarity scoring. Case and punctuation are normalized away, and
//! stopwords are dropped before counting because articles and wh-words
//! carry no signal when matching one short prompt against another.

use std::collections::HashMap;

/// Words ignored when vectorizing prompts.
const STOPWORDS: &[&str] = &[
    "a", "an", "the", "is", "are", "am", "was", "were", "be", "been", "being", "and", "or", "but",
    "what", "which", "who", "whom", "where", "when", "why", "how",
];

/// Check if a token is a vectorizer stopword.
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// Vectorize text into a term-frequency map.
///
/// Lower-cases the input, splits on runs of non-word characters, drops
/// stopwords, and counts the surviving tokens. Empty and all-stopword
/// input both yield an empty map.
pub fn vectorize(text: &str) -> HashMap<String, u32> {
    let mut terms: HashMap<String, u32> = HashMap::new();
    for token in text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|t| !t.is_empty() && !is_stopword(t))
    {
        *terms.entry(token.to_string()).or_insert(0) += 1;
    }
    terms
}
