//! Moves paths into timestamped session directories and restores them.

use chrono::{DateTime, Local};
use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::manifest::{TrashEntry, TrashManifest, MANIFEST_FILE, SESSION_FORMAT};
use crate::error::{Result, TrashError};
use crate::paths::{default_trash_dir, home_dir, normalize};

/// One entry that could not be put back.
#[derive(Debug, Clone)]
pub struct FailedRestore {
    pub original_path: PathBuf,
    pub error: String,
}

/// Outcome of restoring a session.
#[derive(Debug, Clone)]
pub struct RestoreReport {
    pub session_id: String,
    pub restored: Vec<PathBuf>,
    pub failed: Vec<FailedRestore>,
    /// False only when the session was kept for a later retry.
    pub session_removed: bool,
}

impl RestoreReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Owner of the trash root and every session directory below it.
#[derive(Debug, Clone)]
pub struct TrashStore {
    root: PathBuf,
    keep_failed_sessions: bool,
}

impl TrashStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            keep_failed_sessions: false,
        }
    }

    /// Store rooted at `~/.burrow/trash`.
    pub fn for_current_user() -> Result<Self> {
        Ok(Self::new(default_trash_dir(&home_dir()?)))
    }

    /// Keep a session whose restore partly failed, with only the failed entries.
    pub fn with_keep_failed_sessions(mut self, keep: bool) -> Self {
        self.keep_failed_sessions = keep;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Session ids, oldest first. A missing root has no sessions.
    pub fn sessions(&self) -> std::result::Result<Vec<String>, TrashError> {
        let read_dir = match fs::read_dir(&self.root) {
            Ok(rd) => rd,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(TrashError::ListRoot {
                    path: self.root.clone(),
                    source: e,
                })
            }
        };

        let mut sessions: Vec<String> = read_dir
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .filter_map(|e| e.file_name().to_str().map(str::to_string))
            .collect();
        sessions.sort();
        Ok(sessions)
    }

    /// Move `paths` into a new session and record the moves.
    ///
    /// Returns the session id (`YYYYMMDD_HHMMSS`).
    pub fn move_to_trash(&self, paths: &[PathBuf]) -> std::result::Result<String, TrashError> {
        self.move_to_trash_at(paths, Local::now())
    }

    /// Same as [`move_to_trash`](Self::move_to_trash) with an explicit session time.
    ///
    /// Moves run in input order. If one fails, the paths already moved stay
    /// in the session and are recorded so they can still be restored; the
    /// remaining paths are left in place.
    pub fn move_to_trash_at(
        &self,
        paths: &[PathBuf],
        now: DateTime<Local>,
    ) -> std::result::Result<String, TrashError> {
        let session_id = now.format(SESSION_FORMAT).to_string();
        let session_dir = self.create_session_dir(&session_id)?;

        let mut manifest = TrashManifest::new(now);
        let mut used: HashSet<OsString> = HashSet::from([OsString::from(MANIFEST_FILE)]);

        for path in paths {
            let original_path = normalize(path);
            let trash_path = session_dir.join(unique_name(&original_path, &mut used));

            if let Err(e) = fs::rename(&original_path, &trash_path) {
                self.abandon_session(&session_dir, &manifest);
                return Err(TrashError::Move {
                    path: original_path,
                    source: e,
                });
            }

            tracing::debug!(
                from = %original_path.display(),
                to = %trash_path.display(),
                "Moved to trash"
            );
            manifest.entries.push(TrashEntry {
                original_path,
                trash_path,
            });
        }

        manifest.write(&session_dir)?;
        tracing::info!(session = %session_id, entries = manifest.entries.len(), "Created trash session");
        Ok(session_id)
    }

    /// Put back every entry of the most recent session.
    ///
    /// Individual failures are reported but do not stop the remaining
    /// entries. The session directory is then removed, unless
    /// `keep_failed_sessions` is set and something failed.
    pub fn restore_last(&self) -> std::result::Result<RestoreReport, TrashError> {
        let session_id = self
            .sessions()?
            .pop()
            .ok_or(TrashError::NoSessions)?;
        let session_dir = self.root.join(&session_id);
        let manifest = TrashManifest::read(&session_dir, &session_id)?;

        let mut report = RestoreReport {
            session_id: session_id.clone(),
            restored: Vec::new(),
            failed: Vec::new(),
            session_removed: false,
        };
        let mut remaining = Vec::new();

        for entry in &manifest.entries {
            match restore_entry(entry) {
                Ok(()) => report.restored.push(entry.original_path.clone()),
                Err(e) => {
                    tracing::warn!(
                        path = %entry.original_path.display(),
                        error = %e,
                        "Failed to restore"
                    );
                    report.failed.push(FailedRestore {
                        original_path: entry.original_path.clone(),
                        error: e.to_string(),
                    });
                    remaining.push(entry.clone());
                }
            }
        }

        if self.keep_failed_sessions && !remaining.is_empty() {
            let leftover = TrashManifest {
                timestamp: manifest.timestamp,
                entries: remaining,
            };
            leftover.write(&session_dir)?;
            tracing::warn!(session = %session_id, failed = report.failed.len(), "Kept trash session for retry");
        } else {
            fs::remove_dir_all(&session_dir).map_err(|e| TrashError::RemoveSession {
                path: session_dir.clone(),
                source: e,
            })?;
            report.session_removed = true;
        }

        tracing::info!(
            session = %session_id,
            restored = report.restored.len(),
            failed = report.failed.len(),
            "Restored trash session"
        );
        Ok(report)
    }

    fn create_session_dir(&self, session_id: &str) -> std::result::Result<PathBuf, TrashError> {
        fs::create_dir_all(&self.root).map_err(|e| TrashError::CreateSession {
            path: self.root.clone(),
            source: e,
        })?;

        let session_dir = self.root.join(session_id);
        match fs::create_dir(&session_dir) {
            Ok(()) => Ok(session_dir),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                Err(TrashError::SessionExists(session_id.to_string()))
            }
            Err(e) => Err(TrashError::CreateSession {
                path: session_dir,
                source: e,
            }),
        }
    }

    /// Record what a failed batch already moved, or drop the session if nothing was.
    fn abandon_session(&self, session_dir: &Path, manifest: &TrashManifest) {
        if manifest.entries.is_empty() {
            if let Err(e) = fs::remove_dir(session_dir) {
                tracing::warn!(path = %session_dir.display(), error = %e, "Failed to remove empty trash session");
            }
            return;
        }
        if let Err(e) = manifest.write(session_dir) {
            tracing::warn!(error = %e, "Failed to record partial trash session");
        }
    }
}

fn restore_entry(entry: &TrashEntry) -> io::Result<()> {
    if fs::symlink_metadata(&entry.original_path).is_ok() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "original location is occupied",
        ));
    }
    if let Some(parent) = entry.original_path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            tracing::warn!(path = %parent.display(), error = %e, "Failed to recreate parent directory");
        }
    }
    fs::rename(&entry.trash_path, &entry.original_path)
}

/// Session-local file name for `path`: its basename, or `<basename>-N`
/// when that name is already taken in this session.
fn unique_name(path: &Path, used: &mut HashSet<OsString>) -> OsString {
    let base = path
        .file_name()
        .unwrap_or_else(|| OsStr::new("item"))
        .to_os_string();

    let mut candidate = base.clone();
    let mut n = 1;
    while used.contains(&candidate) {
        candidate = base.clone();
        candidate.push(format!("-{n}"));
        n += 1;
    }
    used.insert(candidate.clone());
    candidate
}
