use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Serialize, de::DeserializeOwned};

use crate::session::result::RunRecord;
use crate::store::RunRecorder;
use crate::store::schema::RunHistoryData;

pub const APP_DIR: &str = "codedrill";
const HISTORY_FILE: &str = "run_history.json";

pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);
        Self::with_base_dir(base_dir)
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)
            .with_context(|| format!("creating {}", base_dir.display()))?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.file_path(name);
        if !path.exists() {
            return T::default();
        }
        match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!("ignoring unreadable {}: {e}", path.display());
                T::default()
            }),
            Err(e) => {
                log::warn!("failed to read {}: {e}", path.display());
                T::default()
            }
        }
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)
            .with_context(|| format!("creating {}", tmp_path.display()))?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)
            .with_context(|| format!("replacing {}", path.display()))?;
        Ok(())
    }

    /// Saved runs, oldest first. Stale or corrupt files read as empty.
    pub fn load_history(&self) -> RunHistoryData {
        let history: RunHistoryData = self.load(HISTORY_FILE);
        if history.needs_reset() {
            log::warn!(
                "run history schema {} is stale, starting fresh",
                history.schema_version
            );
            return RunHistoryData::default();
        }
        history
    }

    pub fn save_history(&self, data: &RunHistoryData) -> Result<()> {
        self.save(HISTORY_FILE, data)
    }
}

impl RunRecorder for JsonStore {
    fn record(&mut self, record: &RunRecord) -> Result<()> {
        let mut history = self.load_history();
        history.push(record.clone());
        self.save_history(&history)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use tempfile::TempDir;

    use super::*;
    use crate::generator::{Concept, Language};
    use crate::store::schema::{MAX_HISTORY, SCHEMA_VERSION};

    fn make_test_store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    fn record(wpm: u32) -> RunRecord {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        RunRecord {
            started_at: start,
            ended_at: start + Duration::seconds(20),
            duration_ms: 20_000,
            language: Language::Rust,
            concept: Concept::Typing,
            wpm,
            raw_wpm: wpm + 5,
            accuracy: 95,
            chars: 120,
        }
    }

    #[test]
    fn test_empty_store_has_no_history() {
        let (_dir, store) = make_test_store();
        assert!(store.load_history().runs.is_empty());
    }

    #[test]
    fn test_record_appends_and_persists() {
        let (dir, mut store) = make_test_store();
        store.record(&record(40)).unwrap();
        store.record(&record(55)).unwrap();

        let reopened = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        let history = reopened.load_history();
        assert_eq!(history.runs.len(), 2);
        assert_eq!(history.runs[1], record(55));
        assert!(!dir.path().join("run_history.tmp").exists());
    }

    #[test]
    fn test_history_is_capped_on_disk() {
        let (_dir, mut store) = make_test_store();
        let mut history = RunHistoryData::default();
        for i in 0..MAX_HISTORY as u32 {
            history.push(record(i));
        }
        store.save_history(&history).unwrap();
        store.record(&record(999)).unwrap();

        let history = store.load_history();
        assert_eq!(history.runs.len(), MAX_HISTORY);
        assert_eq!(history.runs[0].wpm, 1);
        assert_eq!(history.runs.last().map(|r| r.wpm), Some(999));
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let (dir, mut store) = make_test_store();
        fs::write(dir.path().join("run_history.json"), "{ not json").unwrap();
        assert!(store.load_history().runs.is_empty());
        // Recording over a corrupt file starts a fresh history.
        store.record(&record(30)).unwrap();
        assert_eq!(store.load_history().runs.len(), 1);
    }

    #[test]
    fn test_stale_schema_is_discarded() {
        let (dir, mut store) = make_test_store();
        let stale = RunHistoryData {
            schema_version: 99,
            runs: vec![record(40), record(50)],
        };
        fs::write(
            dir.path().join("run_history.json"),
            serde_json::to_string(&stale).unwrap(),
        )
        .unwrap();

        let history = store.load_history();
        assert!(!history.needs_reset());
        assert!(history.runs.is_empty());

        // The next record replaces the stale file instead of appending to it.
        store.record(&record(60)).unwrap();
        let history = store.load_history();
        assert_eq!(history.runs, vec![record(60)]);
        assert_eq!(history.schema_version, SCHEMA_VERSION);
    }
}
