//! In-memory scenario knowledge base.
//!
//! Holds the vectorized snapshot the match engine scans. The snapshot is
//! an immutable `Arc<Vec<_>>` swapped wholesale on reload and extended
//! copy-on-write on learn, so readers always see a complete snapshot and
//! never block each other or the writer.

use crate::store::{ScenarioRecord, ScenarioStore};
use crate::vectorizer;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

/// A scenario with its prompt vectorized for similarity scoring.
#[derive(Debug, Clone)]
pub struct ScenarioVector {
    pub prompt: String,
    pub answer: String,
    /// Term-frequency map of the prompt, computed once at load time.
    pub terms: HashMap<String, u32>,
}

impl ScenarioVector {
    fn from_record(record: ScenarioRecord) -> Self {
        let terms = vectorizer::vectorize(&record.prompt);
        Self {
            prompt: record.prompt,
            answer: record.answer,
            terms,
        }
    }
}

/// Vectorized scenarios, reloadable from the backing store.
pub struct KnowledgeBase {
    store: Arc<dyn ScenarioStore>,
    snapshot: RwLock<Arc<Vec<ScenarioVector>>>,
}

impl KnowledgeBase {
    /// Empty knowledge base over `store`; call [`KnowledgeBase::reload`]
    /// to populate it.
    pub fn new(store: Arc<dyn ScenarioStore>) -> Self {
        Self {
            store,
            snapshot: RwLock::new(Arc::new(Vec::new())),
        }
    }

    /// Current snapshot. Cheap to take; callers scan the returned `Arc`
    /// without holding any lock.
    pub fn snapshot(&self) -> Arc<Vec<ScenarioVector>> {
        self.snapshot.read().unwrap().clone()
    }

    /// Number of scenarios in the current snapshot.
    pub fn len(&self) -> usize {
        self.snapshot.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rebuild the snapshot from the backing store.
    ///
    /// On store failure the previous snapshot stays live and the error is
    /// returned; callers decide whether that is fatal.
    pub fn reload(&self) -> Result<usize> {
        let records = self
            .store
            .list_all()
            .context("failed to load scenarios from store")?;
        let vectors: Vec<ScenarioVector> =
            records.into_iter().map(ScenarioVector::from_record).collect();
        let count = vectors.len();
        *self.snapshot.write().unwrap() = Arc::new(vectors);
        info!("Reloaded {} scenarios.", count);
        Ok(count)
    }

    /// Learn one scenario: validate, persist, then append it to the live
    /// snapshot so it is matchable without waiting for the next reload.
    ///
    /// Returns whether the scenario was accepted. Validation failures and
    /// store errors leave the snapshot untouched.
    pub fn learn(&self, prompt: &str, answer: &str) -> bool {
        let prompt = prompt.trim();
        let answer = answer.trim();
        if prompt.is_empty() || answer.is_empty() {
            warn!("Rejected learn request with blank prompt or answer");
            return false;
        }

        match self.store.insert(prompt, answer) {
            Ok(true) => {
                self.append(ScenarioVector::from_record(ScenarioRecord {
                    prompt: prompt.to_string(),
                    answer: answer.to_string(),
                }));
                true
            }
            Ok(false) => {
                warn!("Store did not persist scenario '{}'", prompt);
                false
            }
            Err(e) => {
                warn!("Failed to persist scenario '{}': {:#}", prompt, e);
                false
            }
        }
    }

    /// Learn a batch of scenarios independently; one failure does not
    /// abort the rest. Returns the number accepted.
    pub fn learn_batch(&self, pairs: &[(String, String)]) -> usize {
        pairs
            .iter()
            .filter(|(prompt, answer)| self.learn(prompt, answer))
            .count()
    }

    fn append(&self, scenario: ScenarioVector) {
        let mut guard = self.snapshot.write().unwrap();
        let mut next = Vec::with_capacity(guard.len() + 1);
        next.extend(guard.iter().cloned());
        next.push(scenario);
        *guard = Arc::new(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryScenarioStore;

    fn base_with(pairs: &[(&str, &str)]) -> (Arc<MemoryScenarioStore>, KnowledgeBase) {
        let store = Arc::new(MemoryScenarioStore::with_scenarios(pairs));
        let base = KnowledgeBase::new(store.clone());
        base.reload().unwrap();
        (store, base)
    }

    #[test]
    fn test_reload_vectorizes_stored_scenarios() {
        let (_, base) = base_with(&[("What is a duck?", "Only the smartest bird.")]);
        let snapshot = base.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].answer, "Only the smartest bird.");
        assert_eq!(snapshot[0].terms.get("duck"), Some(&1));
        assert!(!snapshot[0].terms.contains_key("what"));
    }

    #[test]
    fn test_reload_failure_keeps_previous_snapshot() {
        let (store, base) = base_with(&[("Hello", "Hi there!")]);
        assert_eq!(base.len(), 1);

        store.set_fail_reads(true);
        assert!(base.reload().is_err());
        assert_eq!(base.len(), 1);
        assert_eq!(base.snapshot()[0].answer, "Hi there!");
    }

    #[test]
    fn test_learn_appends_to_snapshot_and_store() {
        let (store, base) = base_with(&[]);
        assert!(base.learn("What is rain?", "Duck weather."));
        assert_eq!(base.len(), 1);
        assert_eq!(store.count(), 1);
        assert_eq!(base.snapshot()[0].terms.get("rain"), Some(&1));
    }

    #[test]
    fn test_learn_trims_whitespace() {
        let (store, base) = base_with(&[]);
        assert!(base.learn("  Hello  ", "  Hi there!  "));
        let all = store.list_all().unwrap();
        assert_eq!(all[0].prompt, "Hello");
        assert_eq!(all[0].answer, "Hi there!");
    }

    #[test]
    fn test_learn_rejects_blank_fields() {
        let (store, base) = base_with(&[]);
        assert!(!base.learn("", "answer"));
        assert!(!base.learn("prompt", ""));
        assert!(!base.learn("   ", "   "));
        assert_eq!(base.len(), 0);
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_learn_store_failure_leaves_snapshot_untouched() {
        let (store, base) = base_with(&[("Hello", "Hi there!")]);
        store.set_fail_writes(true);
        assert!(!base.learn("What is rain?", "Duck weather."));
        assert_eq!(base.len(), 1);
    }

    #[test]
    fn test_learn_batch_counts_only_successes() {
        let (_, base) = base_with(&[]);
        let pairs = vec![
            ("What is rain?".to_string(), "Duck weather.".to_string()),
            ("".to_string(), "ignored".to_string()),
            ("Hello".to_string(), "Hi there!".to_string()),
        ];
        assert_eq!(base.learn_batch(&pairs), 2);
        assert_eq!(base.len(), 2);
    }

    #[test]
    fn test_snapshot_is_isolated_from_later_learns() {
        let (_, base) = base_with(&[("Hello", "Hi there!")]);
        let before = base.snapshot();
        assert!(base.learn("What is rain?", "Duck weather."));
        assert_eq!(before.len(), 1);
        assert_eq!(base.snapshot().len(), 2);
    }
}
