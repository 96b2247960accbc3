//! Hard-coded protections consulted before any path is sized or trashed.
//!
//! Checks run in a fixed order and the first veto wins:
//! 1. the home directory or the filesystem root
//! 2. OS-protected prefixes
//! 3. version-control metadata at, below or above the path
//! 4. well-known user document directories

mod vcs;

pub use vcs::{contains_vcs_metadata, inside_vcs_repo, is_vcs_metadata, touches_vcs, VCS_METADATA_DIR};

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::paths::{expand_home, home_dir, normalize};

/// Prefixes owned by the operating system.
pub const PROTECTED_PREFIXES: &[&str] = &[
    "/System",
    "/Library/Apple",
    "/usr/bin",
    "/usr/sbin",
    "/usr/lib",
    "/usr/libexec",
    "/bin",
    "/sbin",
    "/lib",
    "/lib64",
    "/boot",
];

/// User directories that are never removed as a whole.
pub const USER_DOCUMENT_DIRS: &[&str] = &["Documents", "Desktop", "Downloads"];

/// Why a path was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    HomeOrRoot,
    SystemProtected,
    VersionControl,
    UserDocuments,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            DenyReason::HomeOrRoot => "Cannot delete home or root directory",
            DenyReason::SystemProtected => {
                "Path is protected by System Integrity Protection (SIP)"
            }
            DenyReason::VersionControl => "Path contains Git metadata (.git)",
            DenyReason::UserDocuments => "Path is a common user document directory",
        };
        f.write_str(msg)
    }
}

/// Allow/deny decision for one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allowed,
    Denied(DenyReason),
}

impl Verdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Verdict::Allowed)
    }

    /// Human-readable reason; empty when allowed.
    pub fn reason(&self) -> String {
        match self {
            Verdict::Allowed => String::new(),
            Verdict::Denied(reason) => reason.to_string(),
        }
    }
}

/// The set of guarded locations for one user.
#[derive(Debug, Clone)]
pub struct SafetyPolicy {
    home: PathBuf,
    protected_prefixes: Vec<PathBuf>,
    user_dirs: Vec<PathBuf>,
}

impl SafetyPolicy {
    /// Policy for the given home directory.
    pub fn new(home: &Path) -> Self {
        let home = normalize(home);
        let user_dirs = USER_DOCUMENT_DIRS.iter().map(|d| home.join(d)).collect();
        Self {
            home,
            protected_prefixes: PROTECTED_PREFIXES.iter().map(PathBuf::from).collect(),
            user_dirs,
        }
    }

    /// Policy for the current user's home directory.
    pub fn for_current_user() -> Result<Self> {
        Ok(Self::new(&home_dir()?))
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Expand `~` and normalize, the same way `check` sees its input.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match path.to_str() {
            Some(s) => normalize(&expand_home(s, &self.home)),
            None => normalize(path),
        }
    }

    /// Decide whether `path` may be removed. Performs no writes.
    pub fn check(&self, path: &Path) -> Verdict {
        let path = self.resolve(path);

        if path == self.home || path.parent().is_none() {
            return Verdict::Denied(DenyReason::HomeOrRoot);
        }

        if self.protected_prefixes.iter().any(|p| path.starts_with(p)) {
            return Verdict::Denied(DenyReason::SystemProtected);
        }

        if touches_vcs(&path) {
            return Verdict::Denied(DenyReason::VersionControl);
        }

        if self.user_dirs.iter().any(|d| *d == path) {
            return Verdict::Denied(DenyReason::UserDocuments);
        }

        Verdict::Allowed
    }
}

/// Check `path` against the current user's policy.
///
/// Fails closed when the home directory cannot be determined.
pub fn is_safe(path: &Path) -> Verdict {
    match SafetyPolicy::for_current_user() {
        Ok(policy) => policy.check(path),
        Err(_) => Verdict::Denied(DenyReason::HomeOrRoot),
    }
}
