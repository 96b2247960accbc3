//! User-supplied rules loaded from a JSON file.

use serde::de::value::StringDeserializer;
use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::io;
use std::path::Path;

use super::rule::{CleanupRule, RiskLevel};
use crate::error::RuleError;

/// Category given to custom rules that do not name one.
pub const CUSTOM_CATEGORY: &str = "Custom";
/// Provenance markers forced onto every custom rule.
pub const CUSTOM_RULE_VERSION: &str = "1.0.0";
pub const CUSTOM_INTRODUCED_IN: &str = "custom";

/// On-disk shape of a custom rule; every field but `name` and `paths` is optional.
#[derive(Debug, Deserialize)]
struct CustomRuleRecord {
    name: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    paths: Vec<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    risk_level: Option<RiskLevel>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    explanation: String,
}

/// A missing, null or blank risk level leaves the rule at the default.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<RiskLevel>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(level) if !level.trim().is_empty() => {
            let level: StringDeserializer<D::Error> = level.trim().to_string().into_deserializer();
            RiskLevel::deserialize(level).map(Some)
        }
        _ => Ok(None),
    }
}

impl CustomRuleRecord {
    fn into_rule(self) -> Result<CleanupRule, RuleError> {
        if self.name.trim().is_empty() {
            return Err(RuleError::Invalid {
                name: self.name,
                reason: "name must not be empty".to_string(),
            });
        }
        if self.paths.iter().all(|p| p.trim().is_empty()) {
            return Err(RuleError::Invalid {
                name: self.name,
                reason: "at least one path is required".to_string(),
            });
        }

        let category = self
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| CUSTOM_CATEGORY.to_string());

        Ok(CleanupRule {
            name: self.name,
            category,
            paths: self.paths.into_iter().filter(|p| !p.trim().is_empty()).collect(),
            risk_level: self.risk_level.unwrap_or(RiskLevel::Manual),
            description: self.description,
            explanation: self.explanation,
            rule_version: CUSTOM_RULE_VERSION.to_string(),
            introduced_in: CUSTOM_INTRODUCED_IN.to_string(),
        })
    }
}

/// Parse custom rules from JSON text.
pub fn parse_custom_rules(data: &str, origin: &Path) -> Result<Vec<CleanupRule>, RuleError> {
    let records: Vec<CustomRuleRecord> =
        serde_json::from_str(data).map_err(|e| RuleError::ParseError {
            path: origin.to_path_buf(),
            source: e,
        })?;

    records.into_iter().map(CustomRuleRecord::into_rule).collect()
}

/// Load custom rules from `path`.
///
/// A missing file is not an error and yields no rules.
pub fn load_custom_rules(path: &Path) -> Result<Vec<CleanupRule>, RuleError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No custom rule file");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(RuleError::ReadError {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    let rules = parse_custom_rules(&data, path)?;
    tracing::debug!(path = %path.display(), count = rules.len(), "Loaded custom rules");
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_fields_get_defaults() {
        let json = r#"[{"name": "Old builds", "paths": ["~/builds"]}]"#;
        let rules = parse_custom_rules(json, Path::new("rules.json")).unwrap();

        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].category, CUSTOM_CATEGORY);
        assert_eq!(rules[0].risk_level, RiskLevel::Manual);
        assert_eq!(rules[0].introduced_in, CUSTOM_INTRODUCED_IN);
        assert_eq!(rules[0].rule_version, CUSTOM_RULE_VERSION);
    }

    #[test]
    fn blank_risk_level_means_manual() {
        let json = r#"[
            {"name": "Blank", "paths": ["~/a"], "risk_level": ""},
            {"name": "Null", "paths": ["~/b"], "risk_level": null},
            {"name": "Padded", "paths": ["~/c"], "risk_level": " Safe "}
        ]"#;
        let rules = parse_custom_rules(json, Path::new("rules.json")).unwrap();

        assert_eq!(rules[0].risk_level, RiskLevel::Manual);
        assert_eq!(rules[1].risk_level, RiskLevel::Manual);
        assert_eq!(rules[2].risk_level, RiskLevel::Safe);
    }

    #[test]
    fn unknown_risk_level_is_a_parse_error() {
        let json = r#"[{"name": "Odd", "paths": ["~/a"], "risk_level": "Reckless"}]"#;
        let err = parse_custom_rules(json, Path::new("rules.json")).unwrap_err();
        assert!(matches!(err, RuleError::ParseError { .. }));
    }

    #[test]
    fn provenance_is_forced() {
        let json = r#"[{
            "name": "Bazel",
            "category": "Build",
            "paths": ["~/.cache/bazel"],
            "risk_level": "Caution",
            "description": "Bazel output base",
            "explanation": "Rebuilt on demand",
            "rule_version": "9.9.9",
            "introduced_in": "0.0.1"
        }]"#;
        let rules = parse_custom_rules(json, Path::new("rules.json")).unwrap();

        assert_eq!(rules[0].category, "Build");
        assert_eq!(rules[0].risk_level, RiskLevel::Caution);
        assert_eq!(rules[0].rule_version, CUSTOM_RULE_VERSION);
        assert_eq!(rules[0].introduced_in, CUSTOM_INTRODUCED_IN);
    }

    #[test]
    fn rule_without_paths_is_rejected() {
        let json = r#"[{"name": "Empty", "paths": []}]"#;
        let err = parse_custom_rules(json, Path::new("rules.json")).unwrap_err();
        assert!(matches!(err, RuleError::Invalid { .. }));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = parse_custom_rules("{not json", Path::new("rules.json")).unwrap_err();
        assert!(matches!(err, RuleError::ParseError { .. }));
    }

    #[test]
    fn missing_file_yields_no_rules() {
        let tmp = TempDir::new().unwrap();
        let rules = load_custom_rules(&tmp.path().join("absent.json")).unwrap();
        assert!(rules.is_empty());
    }

    #[test]
    fn loads_rules_from_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("custom_rules.json");
        fs::write(&file, r#"[{"name": "Logs", "paths": ["~/logs"]}]"#).unwrap();

        let rules = load_custom_rules(&file).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].name, "Logs");
    }
}
