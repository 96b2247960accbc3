//! Bounded log of completed cleanups.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{BurrowError, Result};

/// Default number of entries kept on disk.
pub const DEFAULT_MAX_ENTRIES: usize = 50;

/// One completed (non-dry-run) cleanup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Trash session id.
    pub id: String,
    pub timestamp: DateTime<Local>,
    pub reclaimed_bytes: u64,
    pub file_count: usize,
    /// Bytes per rule category.
    pub category_stats: BTreeMap<String, u64>,
}

/// JSON-file backed history.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    max_entries: usize,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>, max_entries: usize) -> Self {
        Self {
            path: path.into(),
            max_entries: max_entries.max(1),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries, newest first. A missing file is an empty history.
    pub fn load(&self) -> Result<Vec<HistoryEntry>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(BurrowError::Io {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        let mut entries: Vec<HistoryEntry> =
            serde_json::from_str(&data).map_err(|e| BurrowError::HistoryParse {
                path: self.path.clone(),
                source: e,
            })?;
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }

    /// Append `entry`, dropping the oldest entries beyond the limit.
    pub fn save(&self, entry: HistoryEntry) -> Result<()> {
        let mut entries = self.load()?;
        entries.push(entry);
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries.truncate(self.max_entries);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| BurrowError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let data = serde_json::to_string_pretty(&entries).map_err(|e| BurrowError::Io {
            path: self.path.clone(),
            source: e.into(),
        })?;
        fs::write(&self.path, data).map_err(|e| BurrowError::Io {
            path: self.path.clone(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    fn entry(id: &str, minutes: i64) -> HistoryEntry {
        let base = Local.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        HistoryEntry {
            id: id.to_string(),
            timestamp: base + Duration::minutes(minutes),
            reclaimed_bytes: 1024,
            file_count: 2,
            category_stats: BTreeMap::from([("System".to_string(), 1024)]),
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = HistoryStore::new(tmp.path().join("history.json"), 10);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load_newest_first() {
        let tmp = TempDir::new().unwrap();
        let store = HistoryStore::new(tmp.path().join("nested/history.json"), 10);

        store.save(entry("first", 0)).unwrap();
        store.save(entry("second", 5)).unwrap();

        let entries = store.load().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "second");
        assert_eq!(entries[1].id, "first");
        assert_eq!(entries[0].category_stats["System"], 1024);
    }

    #[test]
    fn test_keeps_only_newest_entries() {
        let tmp = TempDir::new().unwrap();
        let store = HistoryStore::new(tmp.path().join("history.json"), 3);

        for i in 0..5 {
            store.save(entry(&format!("e{i}"), i)).unwrap();
        }

        let ids: Vec<_> = store.load().unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["e4", "e3", "e2"]);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("history.json");
        fs::write(&path, "not json").unwrap();

        let err = HistoryStore::new(&path, 10).load().unwrap_err();
        assert!(matches!(err, BurrowError::HistoryParse { .. }));
    }
}
