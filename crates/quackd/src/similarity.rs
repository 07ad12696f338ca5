//! Cosine similarity over sparse term-frequency vectors.

use std::collections::HashMap;

/// Cosine similarity between two term-frequency vectors, in `[0, 1]`.
///
/// Dot product over the shared terms divided by the product of Euclidean
/// norms. Either side being empty or having zero magnitude scores `0.0`:
/// an all-stopword prompt is simply dissimilar to everything, never a
/// divide-by-zero.
pub fn cosine(a: &HashMap<String, u32>, b: &HashMap<String, u32>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    for (term, &count) in a {
        if let Some(&other) = b.get(term) {
            dot += count as f64 * other as f64;
        }
    }

    let norm_a = norm(a);
    let norm_b = norm(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

fn norm(v: &HashMap<String, u32>) -> f64 {
    v.values().map(|&c| (c as f64) * (c as f64)).sum::<f64>().sqrt()
}
