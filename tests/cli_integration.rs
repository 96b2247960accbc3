use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn burrow() -> Command {
    Command::cargo_bin("burrow").unwrap()
}

/// A `burrow` invocation whose home and config directories live in `home`.
fn burrow_in(home: &Path) -> Command {
    let mut cmd = burrow();
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("RUST_LOG");
    cmd
}

fn seed_npm_cache(home: &Path) {
    let cache = home.join(".npm/_cacache");
    fs::create_dir_all(&cache).unwrap();
    fs::write(cache.join("index"), vec![b'x'; 4096]).unwrap();
}

#[test]
fn shows_help() {
    burrow()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reversible cleanup"));
}

#[test]
fn shows_version() {
    burrow()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn requires_subcommand() {
    burrow()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn rules_lists_builtin_catalog() {
    let home = TempDir::new().unwrap();
    burrow_in(home.path())
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("npm Cache"))
        .stdout(predicate::str::contains("Package Managers"));
}

#[test]
fn rules_explain_unknown_rule_fails() {
    let home = TempDir::new().unwrap();
    burrow_in(home.path())
        .args(["rules", "--explain", "No Such Rule"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("rule not found"));
}

#[test]
fn custom_rules_are_loaded() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join(".config/burrow");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("custom_rules.json"),
        r#"[{"name": "Scratch", "paths": ["~/scratch"], "description": "Scratch space"}]"#,
    )
    .unwrap();

    burrow_in(home.path())
        .args(["rules", "--explain", "scratch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Category:    Custom"))
        .stdout(predicate::str::contains("Manual"));
}

#[test]
fn scan_on_empty_home_finds_nothing() {
    let home = TempDir::new().unwrap();
    burrow_in(home.path())
        .arg("scan")
        .assert()
        .success()
        .stdout(predicate::str::contains("No cleanup candidates found"));
}

#[test]
fn scan_json_reports_seeded_cache() {
    let home = TempDir::new().unwrap();
    seed_npm_cache(home.path());

    let output = burrow_in(home.path())
        .args(["scan", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["total_size"], 4096);
    assert_eq!(json["results"][0]["rule"]["name"], "npm Cache");
}

#[test]
fn scan_rejects_invalid_age() {
    let home = TempDir::new().unwrap();
    burrow_in(home.path())
        .args(["scan", "--older-than", "whenever"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid age"));
}

#[test]
fn clean_dry_run_leaves_files_in_place() {
    let home = TempDir::new().unwrap();
    seed_npm_cache(home.path());

    burrow_in(home.path())
        .args(["clean", "--dry-run", "--diff"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DRY RUN"))
        .stdout(predicate::str::contains("_cacache"));

    assert!(home.path().join(".npm/_cacache/index").exists());
    assert!(!home.path().join(".burrow/trash").exists());
}

#[test]
fn clean_then_undo_restores_cache() {
    let home = TempDir::new().unwrap();
    seed_npm_cache(home.path());

    burrow_in(home.path())
        .args(["clean", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("burrow undo"));
    assert!(!home.path().join(".npm/_cacache").exists());

    burrow_in(home.path())
        .args(["history", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"reclaimed_bytes\": 4096"));

    burrow_in(home.path())
        .arg("undo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored 1 path"));
    assert_eq!(
        fs::read(home.path().join(".npm/_cacache/index")).unwrap().len(),
        4096
    );
}

#[test]
fn interactive_scan_cleans_selected_rows() {
    let home = TempDir::new().unwrap();
    seed_npm_cache(home.path());

    burrow_in(home.path())
        .args(["scan", "--interactive"])
        .write_stdin("1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Paths moved to trash: 1"));
    assert!(!home.path().join(".npm/_cacache").exists());

    burrow_in(home.path())
        .arg("undo")
        .assert()
        .success();
    assert!(home.path().join(".npm/_cacache/index").exists());
}

#[test]
fn interactive_scan_skips_on_empty_answer() {
    let home = TempDir::new().unwrap();
    seed_npm_cache(home.path());

    burrow_in(home.path())
        .args(["scan", "-i"])
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing selected"));
    assert!(home.path().join(".npm/_cacache/index").exists());
    assert!(!home.path().join(".burrow/trash").exists());
}

#[test]
fn doctor_reports_checks() {
    let home = TempDir::new().unwrap();
    burrow_in(home.path())
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("Write access"))
        .stdout(predicate::str::contains("Burrow is ready"));
    assert!(home.path().join(".burrow").is_dir());
    assert!(!home.path().join(".burrow/.write_test").exists());
}

#[test]
fn doctor_fails_on_broken_custom_rules() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join(".config/burrow");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("custom_rules.json"), "{not json").unwrap();

    burrow_in(home.path())
        .args(["doctor", "--json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"fail\""))
        .stderr(predicate::str::contains("1 check failed"));
}

#[test]
fn undo_without_sessions_fails() {
    let home = TempDir::new().unwrap();
    burrow_in(home.path())
        .arg("undo")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to undo"));
}

#[test]
fn history_is_empty_by_default() {
    let home = TempDir::new().unwrap();
    burrow_in(home.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No history found"));
}

#[test]
fn explicit_missing_config_fails() {
    let home = TempDir::new().unwrap();
    burrow_in(home.path())
        .args(["--config", "/nonexistent/config.toml", "rules"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn generates_completions() {
    burrow()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("burrow"));
}
