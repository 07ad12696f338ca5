//! Scenario persistence.
//!
//! The knowledge base loads and saves prompt/answer pairs through the
//! [`ScenarioStore`] trait. The daemon runs on the SQLite-backed store;
//! tests use the in-memory one, which can also inject failures.

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// A stored prompt/answer pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioRecord {
    pub prompt: String,
    pub answer: String,
}

/// Storage backend for scenario pairs.
///
/// `list_all` must return records in a stable order across calls; the
/// matcher's tie-break relies on snapshot order being deterministic.
pub trait ScenarioStore: Send + Sync {
    /// All stored scenarios, oldest first.
    fn list_all(&self) -> Result<Vec<ScenarioRecord>>;

    /// Persist a new scenario. Returns whether a row was written.
    fn insert(&self, prompt: &str, answer: &str) -> Result<bool>;
}

/// SQLite-backed scenario store.
pub struct SqliteScenarioStore {
    conn: Mutex<Connection>,
}

impl SqliteScenarioStore {
    /// Open or create the store at `path`, creating parent directories
    /// and the schema as needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create store directory {:?}", parent))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("failed to open scenario database {:?}", path))?;

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// In-memory SQLite database, for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "CREATE TABLE IF NOT EXISTS scenario (
                scenario_db_id INTEGER PRIMARY KEY AUTOINCREMENT,
                prompt TEXT NOT NULL,
                answer TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Number of stored scenarios.
    pub fn count(&self) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM scenario", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Insert `defaults` only when the store is empty, so a fresh install
    /// has something to answer. Returns how many were added.
    pub fn seed_if_empty(&self, defaults: &[(&str, &str)]) -> Result<usize> {
        if self.count()? > 0 {
            return Ok(0);
        }
        for (prompt, answer) in defaults {
            self.insert(prompt, answer)?;
        }
        Ok(defaults.len())
    }
}

impl ScenarioStore for SqliteScenarioStore {
    fn list_all(&self) -> Result<Vec<ScenarioRecord>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT prompt, answer FROM scenario ORDER BY scenario_db_id")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(ScenarioRecord {
                    prompt: row.get(0)?,
                    answer: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn insert(&self, prompt: &str, answer: &str) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let rows = conn.execute(
            "INSERT INTO scenario (prompt, answer, created_at) VALUES (?1, ?2, ?3)",
            params![prompt, answer, Utc::now().to_rfc3339()],
        )?;
        Ok(rows > 0)
    }
}

/// In-memory scenario store with failure injection, for tests.
#[derive(Default)]
pub struct MemoryScenarioStore {
    rows: Mutex<Vec<ScenarioRecord>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryScenarioStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `pairs`.
    pub fn with_scenarios(pairs: &[(&str, &str)]) -> Self {
        let rows = pairs
            .iter()
            .map(|(prompt, answer)| ScenarioRecord {
                prompt: prompt.to_string(),
                answer: answer.to_string(),
            })
            .collect();
        Self {
            rows: Mutex::new(rows),
            ..Default::default()
        }
    }

    /// Make subsequent `list_all` calls fail.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `insert` calls fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

impl ScenarioStore for MemoryScenarioStore {
    fn list_all(&self) -> Result<Vec<ScenarioRecord>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            anyhow::bail!("scenario store unavailable");
        }
        Ok(self.rows.lock().unwrap().clone())
    }

    fn insert(&self, prompt: &str, answer: &str) -> Result<bool> {
        if self.fail_writes.load(Ordering::SeqCst) {
            anyhow::bail!("scenario store unavailable");
        }
        self.rows.lock().unwrap().push(ScenarioRecord {
            prompt: prompt.to_string(),
            answer: answer.to_string(),
        });
        Ok(true)
    }
}
