//! Built-in cleanup rules.

use super::rule::{CleanupRule, RiskLevel};

const RULE_VERSION: &str = "1.0.0";

fn rule(
    name: &str,
    category: &str,
    paths: &[&str],
    risk_level: RiskLevel,
    description: &str,
    explanation: &str,
    introduced_in: &str,
) -> CleanupRule {
    CleanupRule {
        name: name.to_string(),
        category: category.to_string(),
        paths: paths.iter().map(|p| p.to_string()).collect(),
        risk_level,
        description: description.to_string(),
        explanation: explanation.to_string(),
        rule_version: RULE_VERSION.to_string(),
        introduced_in: introduced_in.to_string(),
    }
}

/// Returns all built-in rules, in display order.
pub fn builtin_rules() -> Vec<CleanupRule> {
    vec![
        // Package managers
        rule(
            "Homebrew Cache",
            "Package Managers",
            &["~/Library/Caches/Homebrew", "~/.cache/Homebrew"],
            RiskLevel::Safe,
            "Delete downloaded Homebrew formulae and bottles.",
            "Homebrew caches source archives and pre-built bottles. Installed software is \
             unaffected; Homebrew downloads what it needs again on the next install or upgrade.",
            "0.1.0",
        ),
        rule(
            "npm Cache",
            "Package Managers",
            &["~/.npm/_cacache", "~/.npm/_logs"],
            RiskLevel::Safe,
            "Delete npm global cache and logs.",
            "The npm cache avoids repeated registry requests. Missing entries are fetched \
             again from the registry. Debug logs are only useful for failed installs.",
            "0.1.0",
        ),
        rule(
            "Yarn Cache",
            "Package Managers",
            &["~/Library/Caches/Yarn", "~/.cache/yarn"],
            RiskLevel::Safe,
            "Delete Yarn package cache.",
            "Yarn keeps a global copy of every downloaded package. Projects keep working; \
             the next install repopulates the cache.",
            "0.2.0",
        ),
        rule(
            "pip Cache",
            "Package Managers",
            &["~/Library/Caches/pip", "~/.cache/pip"],
            RiskLevel::Safe,
            "Delete pip package cache.",
            "pip caches wheels and source distributions to speed up reinstalls. \
             Packages are downloaded from PyPI again when needed.",
            "0.1.0",
        ),
        rule(
            "Cargo Registry Cache",
            "Package Managers",
            &["~/.cargo/registry/cache", "~/.cargo/registry/index"],
            RiskLevel::Safe,
            "Delete Rust cargo registry cache.",
            "Cargo caches the registry index and downloaded crate archives. The next build \
             updates the index and downloads dependencies again. Compiled binaries are untouched.",
            "0.1.0",
        ),
        rule(
            "Go Build Cache",
            "Package Managers",
            &["~/Library/Caches/go-build", "~/.cache/go-build"],
            RiskLevel::Safe,
            "Delete Go compiler build cache.",
            "The Go build cache stores compiled packages. `go build` recreates entries on demand.",
            "0.2.0",
        ),
        // Developer tools
        rule(
            "Xcode DerivedData",
            "Developer Tools",
            &["~/Library/Developer/Xcode/DerivedData"],
            RiskLevel::Safe,
            "Delete Xcode build artifacts and indexes.",
            "DerivedData holds intermediate build products, debug symbols and module caches. \
             Xcode rebuilds and re-indexes projects from scratch.",
            "0.1.0",
        ),
        rule(
            "Android Build Cache",
            "Developer Tools",
            &["~/.android/build-cache"],
            RiskLevel::Safe,
            "Delete Android SDK build cache.",
            "Pre-dexed libraries and other build outputs. The Android Gradle plugin \
             repopulates it during later builds.",
            "0.1.0",
        ),
        rule(
            "Gradle Cache",
            "Developer Tools",
            &["~/.gradle/caches"],
            RiskLevel::Caution,
            "Delete Gradle dependency caches.",
            "Every JAR and artifact Gradle has downloaded. No data is lost, but every project \
             downloads all dependencies again, which can be slow on large builds.",
            "0.1.0",
        ),
        rule(
            "JetBrains Caches",
            "Developer Tools",
            &["~/Library/Caches/JetBrains", "~/.cache/JetBrains"],
            RiskLevel::Caution,
            "Delete JetBrains IDE caches and indexes.",
            "IDE indexes and local history caches. The IDE re-indexes open projects on the \
             next start, which takes a while for large codebases.",
            "0.2.0",
        ),
        // System
        rule(
            "User Caches",
            "System",
            &["~/Library/Caches", "~/.cache"],
            RiskLevel::Caution,
            "Delete general application caches.",
            "General per-user application caches. Most applications rebuild them, but some \
             may lose transient local state or start slower the first time.",
            "0.1.0",
        ),
    ]
}
