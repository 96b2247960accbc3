//! Immutable rule catalog handed to the scanner.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use super::builtin::builtin_rules;
use super::custom::load_custom_rules;
use super::rule::CleanupRule;
use crate::error::RuleError;

/// Ordered collection of cleanup rules.
///
/// Built once per invocation from the built-in table plus an optional
/// custom rule file, then only read.
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    rules: Vec<CleanupRule>,
}

impl RuleCatalog {
    /// Catalog holding only the built-in rules.
    pub fn builtin() -> Self {
        Self {
            rules: builtin_rules(),
        }
    }

    /// Built-in rules extended with the custom rules in `custom_file`, if it exists.
    pub fn load(custom_file: Option<&Path>) -> Result<Self, RuleError> {
        let custom = match custom_file {
            Some(path) => load_custom_rules(path)?,
            None => Vec::new(),
        };
        Self::from_rules(builtin_rules().into_iter().chain(custom).collect())
    }

    /// Build a catalog from explicit rules, rejecting duplicate names.
    ///
    /// # Example
    /// ```
    /// use burrow::rules::RuleCatalog;
    ///
    /// let builtin = RuleCatalog::builtin();
    /// let copy = RuleCatalog::from_rules(builtin.rules().to_vec()).unwrap();
    /// assert_eq!(copy.len(), builtin.len());
    /// ```
    pub fn from_rules(rules: Vec<CleanupRule>) -> Result<Self, RuleError> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen.insert(rule.name.to_lowercase()) {
                return Err(RuleError::Duplicate(rule.name.clone()));
            }
        }
        Ok(Self { rules })
    }

    /// All rules in catalog order.
    pub fn rules(&self) -> &[CleanupRule] {
        &self.rules
    }

    /// Look up a rule by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&CleanupRule> {
        self.rules.iter().find(|r| r.name.eq_ignore_ascii_case(name))
    }

    /// Distinct categories, sorted.
    pub fn categories(&self) -> Vec<&str> {
        self.rules
            .iter()
            .map(|r| r.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
