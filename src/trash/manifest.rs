//! On-disk record of one trash session.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TrashError;

/// File name of the manifest inside a session directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// `strftime` format of session directory names.
pub const SESSION_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Maps one trashed item back to where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrashEntry {
    pub original_path: PathBuf,
    pub trash_path: PathBuf,
}

/// Everything needed to undo one session, in move order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrashManifest {
    pub timestamp: DateTime<Local>,
    pub entries: Vec<TrashEntry>,
}

impl TrashManifest {
    pub fn new(timestamp: DateTime<Local>) -> Self {
        Self {
            timestamp,
            entries: Vec::new(),
        }
    }

    /// Read the manifest of `session` stored in `session_dir`.
    pub fn read(session_dir: &Path, session: &str) -> Result<Self, TrashError> {
        let data = fs::read_to_string(session_dir.join(MANIFEST_FILE)).map_err(|e| {
            TrashError::ManifestRead {
                session: session.to_string(),
                source: e,
            }
        })?;
        serde_json::from_str(&data).map_err(|e| TrashError::ManifestParse {
            session: session.to_string(),
            source: e,
        })
    }

    /// Write the manifest into `session_dir`, replacing any previous one.
    pub fn write(&self, session_dir: &Path) -> Result<(), TrashError> {
        let path = session_dir.join(MANIFEST_FILE);
        let data = serde_json::to_string_pretty(self).map_err(|e| TrashError::WriteManifest {
            path: path.clone(),
            source: e.into(),
        })?;
        fs::write(&path, data).map_err(|e| TrashError::WriteManifest { path, source: e })
    }
}
