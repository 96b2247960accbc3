//! Hands scan results to the trash store.

use chrono::Local;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use crate::auth::Authenticator;
use crate::error::{BurrowError, Result};
use crate::history::HistoryEntry;
use crate::rules::RuleResult;
use crate::scanner::path_size;
use crate::trash::{RestoreReport, TrashStore};

/// Session id reported for dry runs.
pub const DRY_RUN_SESSION: &str = "DRY-RUN";

/// Summary of one clean.
#[derive(Debug, Clone, Serialize)]
pub struct CleanOutcome {
    /// Bytes freed, each path counted once.
    pub reclaimed_bytes: u64,
    /// Number of paths moved (or that would be moved).
    pub file_count: usize,
    /// Trash session id, [`DRY_RUN_SESSION`], or empty when nothing was moved.
    pub session_id: String,
    /// Bytes per rule category.
    pub category_bytes: BTreeMap<String, u64>,
    /// Paths in move order.
    pub paths: Vec<PathBuf>,
}

impl CleanOutcome {
    pub fn is_dry_run(&self) -> bool {
        self.session_id == DRY_RUN_SESSION
    }

    /// True when no trash session was created.
    pub fn is_empty(&self) -> bool {
        self.session_id.is_empty()
    }

    /// Record for the cleanup history.
    pub fn to_history_entry(&self) -> HistoryEntry {
        HistoryEntry {
            id: self.session_id.clone(),
            timestamp: Local::now(),
            reclaimed_bytes: self.reclaimed_bytes,
            file_count: self.file_count,
            category_stats: self.category_bytes.clone(),
        }
    }
}

/// Coordinates cleaning and undo on top of a [`TrashStore`].
pub struct Cleaner {
    trash: TrashStore,
    authenticator: Option<Box<dyn Authenticator>>,
}

impl Cleaner {
    pub fn new(trash: TrashStore) -> Self {
        Self {
            trash,
            authenticator: None,
        }
    }

    /// Require approval from `authenticator` before moving or restoring anything.
    pub fn with_authenticator(mut self, authenticator: Box<dyn Authenticator>) -> Self {
        self.authenticator = Some(authenticator);
        self
    }

    pub fn trash(&self) -> &TrashStore {
        &self.trash
    }

    /// Flatten results into the list of paths to move.
    ///
    /// Duplicates are dropped, as are paths inside another selected path.
    pub fn plan(results: &[RuleResult]) -> Vec<PathBuf> {
        Self::partition(results).0
    }

    /// Split result paths into the ones to move and the ones already covered,
    /// each covered path tagged with the index of the result that found it.
    fn partition(results: &[RuleResult]) -> (Vec<PathBuf>, Vec<(usize, &Path)>) {
        let all: Vec<(usize, &Path)> = results
            .iter()
            .enumerate()
            .flat_map(|(i, r)| r.found_paths.iter().map(move |p| (i, p.as_path())))
            .collect();
        let mut seen = HashSet::new();
        let mut planned = Vec::new();
        let mut covered = Vec::new();

        for &(index, path) in &all {
            let nested = all
                .iter()
                .any(|(_, other)| *other != path && path.starts_with(other));
            if !nested && seen.insert(path) {
                planned.push(path.to_path_buf());
            } else {
                covered.push((index, path));
            }
        }
        (planned, covered)
    }

    /// Move every path in `results` to the trash, or only compute totals when `dry_run`.
    ///
    /// Bytes under a covered path are counted once, with the path that holds them.
    /// Nothing is moved and no session is created when there is nothing to clean.
    pub fn clean(&self, results: &[RuleResult], dry_run: bool) -> Result<CleanOutcome> {
        let (paths, covered) = Self::partition(results);
        let mut reclaimed_bytes: u64 = results.iter().map(|r| r.total_size).sum();

        let mut category_bytes = BTreeMap::new();
        for result in results {
            *category_bytes
                .entry(result.rule.category.clone())
                .or_insert(0) += result.total_size;
        }

        for (index, path) in covered {
            let size = match path_size(path) {
                Ok(size) => size,
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "Could not size covered path");
                    0
                }
            };
            reclaimed_bytes = reclaimed_bytes.saturating_sub(size);
            if let Some(bytes) = category_bytes.get_mut(&results[index].rule.category) {
                *bytes = bytes.saturating_sub(size);
            }
        }

        let session_id = if dry_run {
            DRY_RUN_SESSION.to_string()
        } else if paths.is_empty() {
            tracing::info!("Nothing to clean; no trash session created");
            String::new()
        } else {
            self.authorize(&format!("move {} item(s) to the trash", paths.len()))?;
            self.trash.move_to_trash(&paths)?
        };

        Ok(CleanOutcome {
            reclaimed_bytes,
            file_count: paths.len(),
            session_id,
            category_bytes,
            paths,
        })
    }

    /// Restore the most recent trash session.
    pub fn undo(&self) -> Result<RestoreReport> {
        self.authorize("restore the last cleanup")?;
        Ok(self.trash.restore_last()?)
    }

    fn authorize(&self, reason: &str) -> Result<()> {
        let Some(auth) = &self.authenticator else {
            return Ok(());
        };
        if auth.authenticate(reason)? {
            Ok(())
        } else {
            tracing::warn!(backend = auth.name(), reason, "Authentication declined");
            Err(BurrowError::AuthDenied(reason.to_string()))
        }
    }
}
