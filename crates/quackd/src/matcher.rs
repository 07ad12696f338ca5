//! Best-match scan over the scenario snapshot.

use crate::knowledge::ScenarioVector;
use crate::similarity;
use std::collections::HashMap;

/// Minimum cosine score for a stored scenario to count as a match.
pub const SIMILARITY_THRESHOLD: f64 = 0.45;

/// Find the stored scenario most similar to `query`, if any scores at or
/// above [`SIMILARITY_THRESHOLD`].
///
/// Ties keep the first scenario encountered; snapshot order is stable, so
/// the winner is deterministic for a given snapshot. An empty query vector
/// scores `0.0` against everything and never matches.
pub fn find_best_match<'a>(
    query: &HashMap<String, u32>,
    scenarios: &'a [ScenarioVector],
) -> Option<&'a ScenarioVector> {
    let mut best_score = 0.0;
    let mut best: Option<&ScenarioVector> = None;

    for scenario in scenarios {
        let score = similarity::cosine(query, &scenario.terms);
        if score > best_score {
            best_score = score;
            best = Some(scenario);
        }
    }

    if best_score >= SIMILARITY_THRESHOLD {
        best
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::vectorize;

    fn scenario(prompt: &str, answer: &str) -> ScenarioVector {
        ScenarioVector {
            prompt: prompt.to_string(),
            answer: answer.to_string(),
            terms: vectorize(prompt),
        }
    }

    #[test]
    fn test_exact_prompt_matches() {
        let scenarios = vec![
            scenario("What is a duck?", "Only the smartest bird."),
            scenario("Hello", "Hi there!"),
        ];
        let query = vectorize("What is a duck?");
        let hit = find_best_match(&query, &scenarios).unwrap();
        assert_eq!(hit.answer, "Only the smartest bird.");
    }

    #[test]
    fn test_close_paraphrase_matches() {
        let scenarios = vec![scenario("What is a duck?", "Only the smartest bird.")];
        // "duck" against {duck}: score 1.0.
        let hit = find_best_match(&vectorize("duck"), &scenarios).unwrap();
        assert_eq!(hit.answer, "Only the smartest bird.");
    }

    #[test]
    fn test_unrelated_prompt_misses() {
        let scenarios = vec![scenario("What is a duck?", "Only the smartest bird.")];
        assert!(find_best_match(&vectorize("nuclear fusion basics"), &scenarios).is_none());
    }

    #[test]
    fn test_weak_overlap_stays_below_threshold() {
        let scenarios = vec![scenario("duck", "Quack.")];
        // One shared term out of five: 1/sqrt(5) ~ 0.447, just under 0.45.
        let query = vectorize("duck pond swims quietly today");
        assert_eq!(query.len(), 5);
        assert!(find_best_match(&query, &scenarios).is_none());
    }

    #[test]
    fn test_empty_query_never_matches() {
        let scenarios = vec![scenario("What is a duck?", "Only the smartest bird.")];
        assert!(find_best_match(&vectorize(""), &scenarios).is_none());
        assert!(find_best_match(&vectorize("what is the"), &scenarios).is_none());
    }

    #[test]
    fn test_empty_snapshot_never_matches() {
        assert!(find_best_match(&vectorize("duck"), &[]).is_none());
    }

    #[test]
    fn test_tie_keeps_first_scenario() {
        let scenarios = vec![
            scenario("duck pond", "First answer."),
            scenario("duck pond", "Second answer."),
        ];
        let hit = find_best_match(&vectorize("duck pond"), &scenarios).unwrap();
        assert_eq!(hit.answer, "First answer.");
    }

    #[test]
    fn test_highest_score_wins() {
        let scenarios = vec![
            scenario("duck", "Weaker."),
            scenario("duck pond", "Stronger."),
        ];
        let hit = find_best_match(&vectorize("duck pond"), &scenarios).unwrap();
        assert_eq!(hit.answer, "Stronger.");
    }
}
