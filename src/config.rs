use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::history::{HistoryStore, DEFAULT_MAX_ENTRIES};
use crate::paths;
use crate::scanner::ScanOptions;
use crate::trash::TrashStore;

const MIB: u64 = 1024 * 1024;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scanner: ScannerConfig,
    pub trash: TrashConfig,
    pub history: HistoryConfig,
    pub auth: AuthConfig,
    pub rules: RulesConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Path prefixes never reported (may start with `~/`)
    pub excluded_paths: Vec<String>,
    /// Minimum size in MiB a rule must reach to be reported (0 = off)
    pub size_threshold_mb: u64,
    /// Categories skipped unless requested explicitly
    pub disabled_categories: Vec<String>,
    /// Number of parallel threads (0 = auto)
    pub parallel_threads: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrashConfig {
    /// Trash root (default `~/.burrow/trash`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    /// Keep a session when some of its entries could not be restored
    pub keep_failed_sessions: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// History file (default `~/.burrow/history.json`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Number of cleanups remembered
    pub max_entries: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Ask the platform authenticator before cleaning and undoing
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Custom rules file (default `<config_dir>/burrow/custom_rules.json`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_file: Option<String>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location.
    ///
    /// An explicit path must exist. A missing default file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match paths::default_config_file() {
                Some(p) => (p, false),
                None => return Ok(Self::default()),
            },
        };

        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound && !explicit => {
                tracing::debug!(path = %path.display(), "No config file; using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::ReadError { path, source: e }),
        };

        let config: Config =
            toml::from_str(&data).map_err(|e| ConfigError::ParseError { path, source: e })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history.max_entries == 0 {
            return Err(ConfigError::Invalid(
                "history.max_entries must be greater than 0".into(),
            ));
        }
        if self.scanner.size_threshold_mb.checked_mul(MIB).is_none() {
            return Err(ConfigError::Invalid(format!(
                "scanner.size_threshold_mb is too large: {}",
                self.scanner.size_threshold_mb
            )));
        }
        Ok(())
    }

    /// Scan options carrying the configured defaults.
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions::new()
            .with_excluded_paths(self.scanner.excluded_paths.clone())
            .with_size_threshold(self.scanner.size_threshold_mb.saturating_mul(MIB))
            .with_disabled_categories(self.scanner.disabled_categories.clone())
            .with_threads(self.scanner.parallel_threads)
    }

    pub fn trash_store(&self, home: &Path) -> TrashStore {
        let root = match &self.trash.dir {
            Some(dir) => paths::expand_home(dir, home),
            None => paths::default_trash_dir(home),
        };
        TrashStore::new(root).with_keep_failed_sessions(self.trash.keep_failed_sessions)
    }

    pub fn history_store(&self, home: &Path) -> HistoryStore {
        let path = match &self.history.path {
            Some(p) => paths::expand_home(p, home),
            None => paths::default_history_file(home),
        };
        HistoryStore::new(path, self.history.max_entries)
    }

    pub fn custom_rules_file(&self, home: &Path) -> Option<PathBuf> {
        match &self.rules.custom_file {
            Some(p) => Some(paths::expand_home(p, home)),
            None => paths::default_custom_rules_file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.history.max_entries, DEFAULT_MAX_ENTRIES);
        assert!(!config.auth.enabled);
    }

    #[test]
    fn config_serializes_to_toml() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[scanner]"));
        assert!(toml_str.contains("[history]"));
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config: Config = toml::from_str("[scanner]\nsize_threshold_mb = 5\n").unwrap();
        assert_eq!(config.scanner.size_threshold_mb, 5);
        assert_eq!(config.history.max_entries, DEFAULT_MAX_ENTRIES);
    }

    #[test]
    fn zero_history_is_invalid() {
        let config: Config = toml::from_str("[history]\nmax_entries = 0\n").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn oversized_threshold_is_rejected_and_never_wraps() {
        let config: Config =
            toml::from_str("[scanner]\nsize_threshold_mb = 20000000000000\n").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        assert_eq!(config.scan_options().size_threshold, Some(u64::MAX));
    }

    #[test]
    fn scan_options_follow_config() {
        let mut config = Config::default();
        config.scanner.size_threshold_mb = 2;
        config.scanner.parallel_threads = 3;
        config.scanner.disabled_categories = vec!["System".into()];

        let options = config.scan_options();
        assert_eq!(options.size_threshold, Some(2 * 1024 * 1024));
        assert_eq!(options.threads, 3);
        assert_eq!(options.disabled_categories, vec!["System".to_string()]);

        config.scanner.size_threshold_mb = 0;
        assert_eq!(config.scan_options().size_threshold, None);
    }

    #[test]
    fn store_paths_expand_home() {
        let home = Path::new("/home/tester");
        let mut config = Config::default();
        assert_eq!(
            config.trash_store(home).root(),
            Path::new("/home/tester/.burrow/trash")
        );

        config.trash.dir = Some("~/elsewhere".into());
        config.history.path = Some("~/h.json".into());
        config.rules.custom_file = Some("~/rules.json".into());
        assert_eq!(
            config.trash_store(home).root(),
            Path::new("/home/tester/elsewhere")
        );
        assert_eq!(
            config.history_store(home).path(),
            Path::new("/home/tester/h.json")
        );
        assert_eq!(
            config.custom_rules_file(home),
            Some(PathBuf::from("/home/tester/rules.json"))
        );
    }
}
