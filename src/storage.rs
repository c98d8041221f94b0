//! Parlay history persistence
//!
//! Append-only JSON store. The current format is a container with
//! `parlays` and `slips` arrays; legacy files holding a bare array are
//! still read and appended to. A missing, empty, or corrupt file degrades
//! to the empty container.

use crate::error::{BotError, Result};
use crate::types::Pick;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParlayResult {
    Win,
    Loss,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParlayMeta {
    pub legs: usize,
    pub mode: String,
    pub generated_at: DateTime<Utc>,
}

/// One persisted parlay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParlayEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub meta: ParlayMeta,
    pub picks: Vec<Pick>,
    #[serde(default)]
    pub result: Option<ParlayResult>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Container {
    #[serde(default)]
    parlays: Vec<ParlayEntry>,
    #[serde(default)]
    slips: Vec<ParlayEntry>,
}

/// File-backed parlay store
pub struct ParlayStore {
    path: PathBuf,
}

impl ParlayStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Append a generated parlay to both the parlays and slips arrays so
    /// it shows up in history and grading flows.
    pub fn record(&self, picks: &[Pick], meta: ParlayMeta) -> Result<ParlayEntry> {
        let entry = ParlayEntry {
            id: format!("parlay_{}", Uuid::new_v4()),
            timestamp: Utc::now(),
            meta,
            picks: picks.to_vec(),
            result: None,
        };

        let mut container = self.load();
        container.parlays.push(entry.clone());
        container.slips.push(entry.clone());
        self.save(&container)?;
        Ok(entry)
    }

    /// All recorded parlays, oldest first
    pub fn history(&self) -> Vec<ParlayEntry> {
        self.load().parlays
    }

    /// Mark a parlay's outcome. Returns false when the id is unknown.
    pub fn grade(&self, id: &str, result: ParlayResult) -> Result<bool> {
        let mut container = self.load();
        let mut found = false;
        for entry in container
            .parlays
            .iter_mut()
            .chain(container.slips.iter_mut())
        {
            if entry.id == id {
                entry.result = Some(result);
                found = true;
            }
        }
        if found {
            self.save(&container)?;
        }
        Ok(found)
    }

    fn load(&self) -> Container {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return Container::default(),
        };
        if raw.trim().is_empty() {
            return Container::default();
        }
        // Legacy format was a bare array of entries
        if let Ok(entries) = serde_json::from_str::<Vec<ParlayEntry>>(&raw) {
            return Container {
                parlays: entries.clone(),
                slips: entries,
            };
        }
        match serde_json::from_str(&raw) {
            Ok(container) => container,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "corrupt parlay file, starting fresh");
                Container::default()
            }
        }
    }

    fn save(&self, container: &Container) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }
        let json = serde_json::to_string_pretty(container)?;
        std::fs::write(&self.path, json)
            .map_err(|e| BotError::Storage(format!("write {}: {}", self.path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OddsValue, RiskColor};

    fn sample_pick() -> Pick {
        Pick {
            player_name: "Stephen Curry".to_string(),
            market: "points".to_string(),
            line: 28.5,
            odds: OddsValue::Num(-110.0),
            confidence: 72,
            color: RiskColor::Green,
            hit_count: 7,
            window_size: 10,
            playing_today: true,
        }
    }

    fn meta() -> ParlayMeta {
        ParlayMeta {
            legs: 1,
            mode: "normal".to_string(),
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_record_and_history() {
        let dir = tempfile::tempdir().unwrap();
        let store = ParlayStore::new(dir.path().join("parlays.json"));

        let entry = store.record(&[sample_pick()], meta()).unwrap();
        assert!(entry.id.starts_with("parlay_"));

        let history = store.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].picks[0].player_name, "Stephen Curry");
        assert!(history[0].result.is_none());
    }

    #[test]
    fn test_append_preserves_existing() {
        let dir = tempfile::tempdir().unwrap();
        let store = ParlayStore::new(dir.path().join("parlays.json"));

        store.record(&[sample_pick()], meta()).unwrap();
        store.record(&[sample_pick()], meta()).unwrap();

        assert_eq!(store.history().len(), 2);
    }

    #[test]
    fn test_corrupt_file_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parlays.json");
        std::fs::write(&path, "{not valid json").unwrap();

        let store = ParlayStore::new(&path);
        assert!(store.history().is_empty());
        store.record(&[sample_pick()], meta()).unwrap();
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn test_unwritable_path_surfaces_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory sitting where the data file should be makes the
        // write fail
        let path = dir.path().join("parlays.json");
        std::fs::create_dir_all(&path).unwrap();

        let store = ParlayStore::new(&path);
        let err = store.record(&[sample_pick()], meta()).unwrap_err();
        assert!(matches!(err, BotError::Storage(_)));
    }

    #[test]
    fn test_legacy_array_format_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parlays.json");

        let legacy = serde_json::json!([{
            "id": "parlay_old",
            "timestamp": "2025-01-15T00:00:00Z",
            "meta": {"legs": 2, "mode": "safe", "generated_at": "2025-01-15T00:00:00Z"},
            "picks": [],
            "result": "win"
        }]);
        std::fs::write(&path, legacy.to_string()).unwrap();

        let store = ParlayStore::new(&path);
        let history = store.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].result, Some(ParlayResult::Win));

        // Appending normalizes to the container shape
        store.record(&[sample_pick()], meta()).unwrap();
        assert_eq!(store.history().len(), 2);
    }

    #[test]
    fn test_grade_marks_entry() {
        let dir = tempfile::tempdir().unwrap();
        let store = ParlayStore::new(dir.path().join("parlays.json"));

        let entry = store.record(&[sample_pick()], meta()).unwrap();
        assert!(store.grade(&entry.id, ParlayResult::Loss).unwrap());
        assert_eq!(store.history()[0].result, Some(ParlayResult::Loss));

        assert!(!store.grade("parlay_missing", ParlayResult::Win).unwrap());
    }
}
