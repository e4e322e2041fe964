use crate::difficulty::Difficulty;
use crate::error::{GameError, GameResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Storage key the history document lives under.
pub const SCORES_KEY: &str = "scores";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub points: u32,
    pub words_formed: usize,
    pub timestamp: DateTime<Utc>,
    pub difficulty: Difficulty,
}

/// Append-only history of finished rounds.
pub trait ScoreStore: Send {
    /// Full history in append order. Missing or unreadable data yields an empty list.
    fn load(&self) -> Vec<ScoreRecord>;

    /// Persists the history with `record` appended.
    fn append(&mut self, record: &ScoreRecord) -> GameResult<()>;
}

/// History kept as a JSON array in `<dir>/scores.json`.
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", SCORES_KEY)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_all(&self, history: &[ScoreRecord]) -> GameResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(history)?;
        // Write-then-rename so a failed write never truncates the old file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Where an unreadable history is moved before a fresh one is written.
    pub fn quarantine_path(&self) -> PathBuf {
        self.path.with_extension("json.bad")
    }

    fn read(&self) -> Result<Vec<ScoreRecord>, String> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No score history at {:?}", self.path);
                return Ok(Vec::new());
            }
            Err(e) => return Err(format!("unreadable: {}", e)),
        };
        serde_json::from_str(&content).map_err(|e| format!("corrupt: {}", e))
    }

    fn quarantine(&self) -> GameResult<()> {
        let bad = self.quarantine_path();
        fs::rename(&self.path, &bad).map_err(|e| {
            GameError::Persistence(format!(
                "cannot move unreadable history {:?} aside: {}",
                self.path, e
            ))
        })?;
        warn!("Unreadable score history kept at {:?}", bad);
        Ok(())
    }
}

impl ScoreStore for JsonScoreStore {
    fn load(&self) -> Vec<ScoreRecord> {
        self.read().unwrap_or_else(|reason| {
            warn!("Ignoring score history {:?}: {}", self.path, reason);
            Vec::new()
        })
    }

    /// An unreadable existing file is moved to [`JsonScoreStore::quarantine_path`]
    /// first, never overwritten.
    fn append(&mut self, record: &ScoreRecord) -> GameResult<()> {
        let mut history = match self.read() {
            Ok(history) => history,
            Err(reason) => {
                warn!("Score history {:?} is {}", self.path, reason);
                self.quarantine()?;
                Vec::new()
            }
        };
        history.push(record.clone());
        self.write_all(&history)
            .map_err(|e| GameError::Persistence(format!("{:?}: {}", self.path, e)))
    }
}

/// Volatile store for tests and sessions without a writable location.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    records: Vec<ScoreRecord>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> Vec<ScoreRecord> {
        self.records.clone()
    }

    fn append(&mut self, record: &ScoreRecord) -> GameResult<()> {
        self.records.push(record.clone());
        Ok(())
    }
}
