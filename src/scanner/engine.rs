//! Concurrent evaluation of the rule catalog against the filesystem.

use std::fs::{self, Metadata};
use std::path::Path;
use std::time::{Duration, SystemTime};

use humansize::{format_size, BINARY};
use walkdir::WalkDir;

use super::options::ScanOptions;
use super::results::ScanResults;
use super::sink::ResultSink;
use super::size::path_size;
use crate::error::{BurrowError, Result};
use crate::rules::{CleanupRule, RiskLevel, RuleCatalog, RuleResult};
use crate::safety::SafetyPolicy;

/// Directories under home searched in large-file mode.
pub const LARGE_FILE_DIRS: &[&str] = &["Downloads", "Desktop", "Documents", "Movies", "Pictures"];

/// Per-file threshold in large-file mode when none is given.
pub const DEFAULT_LARGE_FILE_THRESHOLD: u64 = 100 * 1024 * 1024;

/// Category of the synthetic rules produced in large-file mode.
pub const LARGE_FILES_CATEGORY: &str = "Large Files";

/// Evaluates a rule catalog with one worker task per rule.
pub struct Scanner {
    catalog: RuleCatalog,
    options: ScanOptions,
    policy: SafetyPolicy,
    /// Expanded exclusion prefixes, matched as plain string prefixes.
    excluded: Vec<String>,
}

impl Scanner {
    /// Create a scanner guarded by the current user's safety policy.
    pub fn new(catalog: RuleCatalog, options: ScanOptions) -> Result<Self> {
        Ok(Self::with_policy(
            catalog,
            options,
            SafetyPolicy::for_current_user()?,
        ))
    }

    /// Create a scanner with an explicit safety policy.
    ///
    /// `~` in rule paths and exclusions expands to the policy's home directory.
    pub fn with_policy(catalog: RuleCatalog, options: ScanOptions, policy: SafetyPolicy) -> Self {
        let excluded = options
            .excluded_paths
            .iter()
            .filter(|p| !p.trim().is_empty())
            .map(|p| policy.resolve(Path::new(p)).to_string_lossy().into_owned())
            .collect();
        Self {
            catalog,
            options,
            policy,
            excluded,
        }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Run the scan and block until every worker has finished.
    ///
    /// Individual path failures are skipped; only a failure to start the
    /// worker pool is reported as an error.
    pub fn scan(&self) -> Result<ScanResults> {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if self.options.threads > 0 {
            builder = builder.num_threads(self.options.threads);
        }
        let pool = builder
            .build()
            .map_err(|e| BurrowError::WorkerPool(e.to_string()))?;

        let sink = ResultSink::new();

        if self.options.large_file_mode {
            let threshold = self
                .options
                .size_threshold
                .unwrap_or(DEFAULT_LARGE_FILE_THRESHOLD);
            tracing::info!(threshold, "Scanning for large files");

            pool.scope(|s| {
                for dir in LARGE_FILE_DIRS {
                    let dir = self.policy.home().join(dir);
                    let sink = &sink;
                    s.spawn(move |_| {
                        if let Some(result) = self.scan_large_files(&dir, threshold) {
                            sink.push(result);
                        }
                    });
                }
            });
        } else {
            pool.scope(|s| {
                for rule in self.catalog.rules() {
                    if !self.options.selects(rule) {
                        continue;
                    }
                    let sink = &sink;
                    s.spawn(move |_| {
                        if let Some(result) = self.evaluate_rule(rule) {
                            sink.push(result);
                        }
                    });
                }
            });
        }

        let results = sink.into_results();
        tracing::info!(
            results = results.results.len(),
            total_size = results.total_size,
            "Scan complete"
        );
        Ok(results)
    }

    /// Evaluate one rule. Returns None when the rule contributes nothing.
    pub fn evaluate_rule(&self, rule: &CleanupRule) -> Option<RuleResult> {
        let now = SystemTime::now();
        let mut found_paths = Vec::new();
        let mut total_size = 0u64;

        for pattern in &rule.paths {
            let path = self.policy.resolve(Path::new(pattern));

            if self.is_excluded(&path) {
                tracing::debug!(rule = %rule.name, path = %path.display(), "Skipping excluded path");
                continue;
            }

            let metadata = match fs::metadata(&path) {
                Ok(m) => m,
                Err(e) => {
                    tracing::debug!(rule = %rule.name, path = %path.display(), error = %e, "Skipping missing path");
                    continue;
                }
            };

            let verdict = self.policy.check(&path);
            if !verdict.is_allowed() {
                tracing::debug!(
                    rule = %rule.name,
                    path = %path.display(),
                    reason = %verdict.reason(),
                    "Skipping unsafe path"
                );
                continue;
            }

            if let Some(min_age) = self.options.min_age {
                if modified_within(&metadata, min_age, now) {
                    tracing::debug!(rule = %rule.name, path = %path.display(), "Skipping recently modified path");
                    continue;
                }
            }

            match path_size(&path) {
                Ok(size) => {
                    found_paths.push(path);
                    total_size += size;
                }
                Err(e) => {
                    tracing::debug!(rule = %rule.name, path = %path.display(), error = %e, "Skipping unreadable path");
                }
            }
        }

        if found_paths.is_empty() {
            return None;
        }

        if let Some(threshold) = self.options.size_threshold {
            if total_size < threshold {
                tracing::debug!(rule = %rule.name, total_size, threshold, "Rule below size threshold");
                return None;
            }
        }

        Some(RuleResult {
            rule: rule.clone(),
            found_paths,
            total_size,
        })
    }

    fn scan_large_files(&self, dir: &Path, threshold: u64) -> Option<RuleResult> {
        let mut found_paths = Vec::new();
        let mut total_size = 0u64;

        let walker = WalkDir::new(dir)
            .into_iter()
            .filter_entry(|e| !self.is_excluded(e.path()));

        for entry in walker.filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            let size = match entry.metadata() {
                Ok(m) => m.len(),
                Err(_) => continue,
            };
            if size > threshold {
                found_paths.push(entry.into_path());
                total_size += size;
            }
        }

        if found_paths.is_empty() {
            return None;
        }

        Some(RuleResult {
            rule: large_file_rule(dir, threshold),
            found_paths,
            total_size,
        })
    }

    /// `~/.npm/_ca` excludes `~/.npm/_cacache` too.
    fn is_excluded(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        self.excluded
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }
}

/// True when the path was modified less than `min_age` ago.
///
/// An unreadable or future timestamp counts as recent.
fn modified_within(metadata: &Metadata, min_age: Duration, now: SystemTime) -> bool {
    match metadata.modified() {
        Ok(mtime) => match now.duration_since(mtime) {
            Ok(age) => age < min_age,
            Err(_) => true,
        },
        Err(_) => true,
    }
}

/// Synthetic rule describing one large-file directory.
fn large_file_rule(dir: &Path, threshold: u64) -> CleanupRule {
    let size = format_size(threshold, BINARY);
    let dir_name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string());

    CleanupRule {
        name: format!("Large Files (>{size}) in {dir_name}"),
        category: LARGE_FILES_CATEGORY.to_string(),
        paths: vec![dir.display().to_string()],
        risk_level: RiskLevel::Manual,
        description: format!("Files larger than {size} in {}", dir.display()),
        explanation: "Large personal files are listed for review only. Check each one before \
                      removing it."
            .to_string(),
        rule_version: "1.0.0".to_string(),
        introduced_in: "0.2.0".to_string(),
    }
}
