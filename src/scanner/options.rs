use std::time::Duration;

use crate::rules::CleanupRule;

/// Configuration for one scan request.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Only evaluate rules in this category (case-insensitive). None = all.
    pub category: Option<String>,

    /// Minimum bytes a rule must reach to be reported. In large-file mode,
    /// the per-file threshold. None = off.
    pub size_threshold: Option<u64>,

    /// Path prefixes never reported (may start with `~/`)
    pub excluded_paths: Vec<String>,

    /// Skip paths modified more recently than this
    pub min_age: Option<Duration>,

    /// Ignore the catalog and look for oversized files in user directories
    pub large_file_mode: bool,

    /// Categories switched off in the user configuration
    pub disabled_categories: Vec<String>,

    /// Number of worker threads (0 = auto)
    pub threads: usize,
}

impl ScanOptions {
    /// Create a new ScanOptions with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the scan to one category; an empty name means all
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = if category.trim().is_empty() {
            None
        } else {
            Some(category)
        };
        self
    }

    /// Set the size threshold in bytes; 0 turns it off
    pub fn with_size_threshold(mut self, bytes: u64) -> Self {
        self.size_threshold = (bytes > 0).then_some(bytes);
        self
    }

    /// Set excluded path prefixes
    pub fn with_excluded_paths(mut self, paths: Vec<String>) -> Self {
        self.excluded_paths = paths;
        self
    }

    /// Skip anything modified within `age`
    pub fn with_min_age(mut self, age: Duration) -> Self {
        self.min_age = (!age.is_zero()).then_some(age);
        self
    }

    /// Switch to large-file mode
    pub fn with_large_file_mode(mut self, enabled: bool) -> Self {
        self.large_file_mode = enabled;
        self
    }

    /// Set disabled categories
    pub fn with_disabled_categories(mut self, categories: Vec<String>) -> Self {
        self.disabled_categories = categories;
        self
    }

    /// Set number of worker threads
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Whether `rule` passes the category filter and is not disabled
    pub fn selects(&self, rule: &CleanupRule) -> bool {
        if let Some(category) = &self.category {
            if !rule.in_category(category) {
                return false;
            }
        }
        !self
            .disabled_categories
            .iter()
            .any(|disabled| rule.in_category(disabled))
    }
}

/// Parse an age like "30d", "24h", "90m" or "45s".
///
/// A bare number is taken as days.
pub fn parse_age(s: &str) -> Option<Duration> {
    let s = s.trim().to_lowercase();
    if s.is_empty() {
        return None;
    }

    let (num_str, unit_secs) = match s.chars().last() {
        Some('d') => (&s[..s.len() - 1], 24 * 60 * 60),
        Some('h') => (&s[..s.len() - 1], 60 * 60),
        Some('m') => (&s[..s.len() - 1], 60),
        Some('s') => (&s[..s.len() - 1], 1),
        _ => (s.as_str(), 24 * 60 * 60),
    };

    num_str
        .trim()
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_mul(unit_secs))
        .map(Duration::from_secs)
}
