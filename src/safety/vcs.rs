//! Version-control metadata detection.

use std::path::Path;
use walkdir::WalkDir;

/// Name of the metadata directory that marks a repository.
pub const VCS_METADATA_DIR: &str = ".git";

/// The path itself is a metadata directory.
pub fn is_vcs_metadata(path: &Path) -> bool {
    path.file_name()
        .map(|name| name == VCS_METADATA_DIR)
        .unwrap_or(false)
}

/// Some entry below `path` is a metadata directory.
///
/// Stops at the first hit. Unreadable subtrees are skipped, so a repository
/// hidden behind a permission error is reported as absent.
pub fn contains_vcs_metadata(path: &Path) -> bool {
    WalkDir::new(path)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .any(|e| e.file_name() == VCS_METADATA_DIR)
}

/// Some ancestor of `path` (including `path`) has a metadata directory as a child.
///
/// The filesystem root itself is not inspected.
pub fn inside_vcs_repo(path: &Path) -> bool {
    path.ancestors()
        .take_while(|a| a.parent().is_some())
        .any(|a| a.join(VCS_METADATA_DIR).exists())
}

/// Any of the three checks hits.
pub fn touches_vcs(path: &Path) -> bool {
    is_vcs_metadata(path) || contains_vcs_metadata(path) || inside_vcs_repo(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn detects_metadata_basename() {
        assert!(is_vcs_metadata(Path::new("/work/project/.git")));
        assert!(!is_vcs_metadata(Path::new("/work/project/.github")));
    }

    #[test]
    fn detects_nested_repository() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("a/b/c/.git")).unwrap();

        assert!(contains_vcs_metadata(tmp.path()));
        assert!(contains_vcs_metadata(&tmp.path().join("a")));
    }

    #[test]
    fn detects_enclosing_repository() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join(".git")).unwrap();
        let deep = tmp.path().join("src/module");
        fs::create_dir_all(&deep).unwrap();

        assert!(inside_vcs_repo(&deep));
        assert!(touches_vcs(&deep));
    }

    #[test]
    fn plain_directory_is_clean() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("cache/objects")).unwrap();
        fs::write(tmp.path().join("cache/objects/blob"), "x").unwrap();

        assert!(!touches_vcs(tmp.path()));
    }

    #[test]
    fn worktree_file_counts_as_metadata() {
        let tmp = TempDir::new().unwrap();
        let checkout = tmp.path().join("checkout");
        fs::create_dir(&checkout).unwrap();
        fs::write(checkout.join(".git"), "gitdir: /elsewhere").unwrap();

        assert!(contains_vcs_metadata(tmp.path()));
    }
}
