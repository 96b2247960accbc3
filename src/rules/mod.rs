//! Cleanup rule definitions.
//!
//! This module provides:
//! - The rule and result types shared by the scanner and the cleaner
//! - The built-in rule table
//! - Loading of user-supplied rules
//! - The immutable `RuleCatalog`

mod builtin;
mod catalog;
mod custom;
mod rule;

pub use builtin::builtin_rules;
pub use catalog::RuleCatalog;
pub use custom::{load_custom_rules, parse_custom_rules, CUSTOM_CATEGORY};
pub use rule::{CleanupRule, RiskLevel, RuleResult};
