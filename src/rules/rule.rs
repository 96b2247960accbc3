//! Core types for cleanup rules and per-rule scan results.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// How much care a rule needs before its paths are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Regenerated transparently by the owning tool.
    Safe,
    /// Safe for data integrity but expensive to rebuild.
    Caution,
    /// Needs a human decision.
    Manual,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLevel::Safe => "Safe",
            RiskLevel::Caution => "Caution",
            RiskLevel::Manual => "Manual",
        };
        f.write_str(s)
    }
}

/// A single cleanup rule definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupRule {
    /// Unique name within a catalog.
    pub name: String,
    /// Free-text grouping (e.g. "Package Managers").
    pub category: String,
    /// Candidate paths; may start with `~/`.
    pub paths: Vec<String>,
    pub risk_level: RiskLevel,
    /// One-line summary.
    pub description: String,
    /// Longer justification shown by `--explain`.
    pub explanation: String,
    pub rule_version: String,
    pub introduced_in: String,
}

impl CleanupRule {
    /// Case-insensitive category comparison.
    pub fn in_category(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(category)
    }
}

/// Outcome of evaluating one rule against the filesystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleResult {
    pub rule: CleanupRule,
    /// Concrete paths that matched and passed every filter.
    pub found_paths: Vec<PathBuf>,
    /// Sum of the sizes of `found_paths` in bytes.
    pub total_size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rule() -> CleanupRule {
        CleanupRule {
            name: "npm Cache".to_string(),
            category: "Package Managers".to_string(),
            paths: vec!["~/.npm/_cacache".to_string()],
            risk_level: RiskLevel::Safe,
            description: "Delete npm cache.".to_string(),
            explanation: "npm re-fetches missing entries.".to_string(),
            rule_version: "1.0.0".to_string(),
            introduced_in: "0.1.0".to_string(),
        }
    }

    #[test]
    fn category_match_ignores_case() {
        let rule = sample_rule();
        assert!(rule.in_category("package managers"));
        assert!(rule.in_category("PACKAGE MANAGERS"));
        assert!(!rule.in_category("Package"));
    }

    #[test]
    fn risk_level_serializes_as_name() {
        let json = serde_json::to_string(&RiskLevel::Caution).unwrap();
        assert_eq!(json, "\"Caution\"");
        assert_eq!(RiskLevel::Manual.to_string(), "Manual");
    }

    #[test]
    fn rule_serializes_with_snake_case_fields() {
        let json = serde_json::to_value(sample_rule()).unwrap();
        assert_eq!(json["risk_level"], "Safe");
        assert_eq!(json["introduced_in"], "0.1.0");
    }
}
