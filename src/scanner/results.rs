use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::rules::RuleResult;

/// Aggregate output of a scan.
///
/// `results` order depends on worker scheduling and carries no meaning.
/// `total_size` always equals the sum of the contained result sizes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanResults {
    pub results: Vec<RuleResult>,
    pub total_size: u64,
}

impl ScanResults {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of paths across all results.
    pub fn path_count(&self) -> usize {
        self.results.iter().map(|r| r.found_paths.len()).sum()
    }

    /// Every found path, in result order.
    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.results.iter().flat_map(|r| r.found_paths.iter())
    }

    /// Bytes per rule category.
    pub fn category_totals(&self) -> BTreeMap<String, u64> {
        let mut totals = BTreeMap::new();
        for result in &self.results {
            *totals.entry(result.rule.category.clone()).or_insert(0) += result.total_size;
        }
        totals
    }

    /// Largest results first, ties broken by rule name.
    pub fn sort_by_size(&mut self) {
        self.results.sort_by(|a, b| {
            b.total_size
                .cmp(&a.total_size)
                .then_with(|| a.rule.name.cmp(&b.rule.name))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{CleanupRule, RiskLevel};

    fn result(name: &str, category: &str, size: u64) -> RuleResult {
        RuleResult {
            rule: CleanupRule {
                name: name.to_string(),
                category: category.to_string(),
                paths: vec![],
                risk_level: RiskLevel::Safe,
                description: String::new(),
                explanation: String::new(),
                rule_version: "1.0.0".to_string(),
                introduced_in: "0.1.0".to_string(),
            },
            found_paths: vec![PathBuf::from(format!("/{name}"))],
            total_size: size,
        }
    }

    #[test]
    fn test_category_totals() {
        let results = ScanResults {
            results: vec![
                result("a", "System", 10),
                result("b", "System", 5),
                result("c", "Developer Tools", 7),
            ],
            total_size: 22,
        };

        let totals = results.category_totals();
        assert_eq!(totals["System"], 15);
        assert_eq!(totals["Developer Tools"], 7);
        assert_eq!(results.path_count(), 3);
    }

    #[test]
    fn test_sort_by_size() {
        let mut results = ScanResults {
            results: vec![
                result("small", "X", 1),
                result("big", "X", 100),
                result("mid", "X", 50),
            ],
            total_size: 151,
        };
        results.sort_by_size();

        let names: Vec<_> = results.results.iter().map(|r| r.rule.name.as_str()).collect();
        assert_eq!(names, vec!["big", "mid", "small"]);
    }

    #[test]
    fn test_serializes_to_json() {
        let results = ScanResults {
            results: vec![result("a", "System", 10)],
            total_size: 10,
        };
        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(json["total_size"], 10);
        assert_eq!(json["results"][0]["found_paths"][0], "/a");
    }
}
