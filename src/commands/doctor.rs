//! Doctor command: checks that burrow can do its job on this machine.

use anyhow::{bail, Result};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;

use super::{plural, print_json, Context};
use crate::cli::ReportArgs;
use crate::paths;

/// File written and removed again to test write access.
const WRITE_TEST_FILE: &str = ".write_test";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Warn,
    Fail,
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Ok => write!(f, "ok"),
            CheckStatus::Warn => write!(f, "warn"),
            CheckStatus::Fail => write!(f, "FAIL"),
        }
    }
}

/// Outcome of one diagnostic.
#[derive(Debug, Clone, Serialize)]
pub struct Check {
    pub name: &'static str,
    pub status: CheckStatus,
    pub detail: String,
}

impl Check {
    fn new(name: &'static str, status: CheckStatus, detail: impl Into<String>) -> Self {
        Self {
            name,
            status,
            detail: detail.into(),
        }
    }
}

/// Run the doctor command.
pub fn run(ctx: &Context, config_path: Option<&Path>, args: ReportArgs) -> Result<()> {
    let checks = diagnose(ctx, config_path);
    let failures = checks
        .iter()
        .filter(|c| c.status == CheckStatus::Fail)
        .count();

    if args.json {
        print_json(&checks)?;
    } else {
        println!("Burrow doctor");
        println!("{}", "-".repeat(60));
        for check in &checks {
            println!("[{:<4}] {:<18} {}", check.status, check.name, check.detail);
        }
        println!("{}", "-".repeat(60));
        if failures == 0 {
            println!("All checks passed. Burrow is ready.");
        }
    }

    if failures > 0 {
        bail!("{} check{} failed", failures, plural(failures));
    }
    Ok(())
}

/// Every diagnostic, in display order.
pub fn diagnose(ctx: &Context, config_path: Option<&Path>) -> Vec<Check> {
    let data_dir = paths::data_dir(&ctx.home);
    vec![
        Check::new("Home directory", CheckStatus::Ok, ctx.home.display().to_string()),
        check_data_dir(&data_dir),
        check_write_access(&data_dir),
        check_config_file(config_path),
        check_rules(ctx),
        check_trash(ctx),
        Check::new("Operating system", CheckStatus::Ok, std::env::consts::OS),
    ]
}

fn check_data_dir(dir: &Path) -> Check {
    if dir.is_dir() {
        Check::new("Data directory", CheckStatus::Ok, dir.display().to_string())
    } else {
        Check::new(
            "Data directory",
            CheckStatus::Warn,
            format!("{} not found (created on first clean)", dir.display()),
        )
    }
}

/// Create `dir` if needed, then write and remove a small file in it.
fn check_write_access(dir: &Path) -> Check {
    const NAME: &str = "Write access";

    if let Err(e) = fs::create_dir_all(dir) {
        return Check::new(NAME, CheckStatus::Fail, format!("{}: {e}", dir.display()));
    }
    let file = dir.join(WRITE_TEST_FILE);
    if let Err(e) = fs::write(&file, b"burrow") {
        return Check::new(NAME, CheckStatus::Fail, format!("{}: {e}", dir.display()));
    }
    if let Err(e) = fs::remove_file(&file) {
        tracing::warn!(path = %file.display(), error = %e, "Could not remove write test file");
    }
    Check::new(NAME, CheckStatus::Ok, dir.display().to_string())
}

fn check_config_file(explicit: Option<&Path>) -> Check {
    const NAME: &str = "Config file";

    match explicit.map(Path::to_path_buf).or_else(paths::default_config_file) {
        Some(path) if path.is_file() => {
            Check::new(NAME, CheckStatus::Ok, path.display().to_string())
        }
        Some(path) => Check::new(
            NAME,
            CheckStatus::Warn,
            format!("{} not found (using defaults)", path.display()),
        ),
        None => Check::new(NAME, CheckStatus::Warn, "no config directory (using defaults)"),
    }
}

fn check_rules(ctx: &Context) -> Check {
    const NAME: &str = "Cleanup rules";

    match ctx.catalog() {
        Ok(catalog) => Check::new(
            NAME,
            CheckStatus::Ok,
            format!("{} rule{} loaded", catalog.len(), plural(catalog.len())),
        ),
        Err(e) => Check::new(NAME, CheckStatus::Fail, format!("{e:#}")),
    }
}

fn check_trash(ctx: &Context) -> Check {
    const NAME: &str = "Trash";

    let store = ctx.config.trash_store(&ctx.home);
    match store.sessions() {
        Ok(sessions) => Check::new(
            NAME,
            CheckStatus::Ok,
            format!(
                "{} ({} session{} to undo)",
                store.root().display(),
                sessions.len(),
                plural(sessions.len())
            ),
        ),
        Err(e) => Check::new(NAME, CheckStatus::Fail, e.to_string()),
    }
}
