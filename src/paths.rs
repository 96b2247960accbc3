//! Path helpers shared by the scanner, the safety checks and the trash store.

use std::path::{Component, Path, PathBuf};

use crate::error::{BurrowError, Result};

/// Application directory name under the config dir and the home dir.
pub const APP_DIR: &str = "burrow";

/// Resolve the current user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or(BurrowError::NoHomeDir)
}

/// Replace a leading `~` with `home`.
///
/// Only `~` on its own or `~/...` is expanded; `~user` forms are left as-is.
pub fn expand_home(pattern: &str, home: &Path) -> PathBuf {
    if pattern == "~" {
        return home.to_path_buf();
    }
    match pattern.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => PathBuf::from(pattern),
    }
}

/// Make `path` absolute and resolve `.` and `..` lexically.
///
/// Symlinks are not followed. `..` at the root stays at the root.
pub fn normalize(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::Prefix(p) => out.push(p.as_os_str()),
            Component::RootDir => out.push(Component::RootDir.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(name) => out.push(name),
        }
    }
    out
}

/// Default configuration file (`<config_dir>/burrow/config.toml`).
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

/// Default custom rules file (`<config_dir>/burrow/custom_rules.json`).
pub fn default_custom_rules_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("custom_rules.json"))
}

/// Per-user data directory (`~/.burrow`).
pub fn data_dir(home: &Path) -> PathBuf {
    home.join(format!(".{APP_DIR}"))
}

/// Default trash root (`~/.burrow/trash`).
pub fn default_trash_dir(home: &Path) -> PathBuf {
    data_dir(home).join("trash")
}

/// Default history file (`~/.burrow/history.json`).
pub fn default_history_file(home: &Path) -> PathBuf {
    data_dir(home).join("history.json")
}
