//! Append-only accumulator shared by concurrent rule evaluations.

use std::sync::{Mutex, PoisonError};

use super::results::ScanResults;
use crate::rules::RuleResult;

#[derive(Debug, Default)]
struct SinkInner {
    results: Vec<RuleResult>,
    total_size: u64,
}

/// Collects rule results from worker tasks.
///
/// A single lock guards both the result list and the running total, and it
/// is only held for the append itself.
#[derive(Debug, Default)]
pub struct ResultSink {
    inner: Mutex<SinkInner>,
}

impl ResultSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one contributing rule. Results with no paths are dropped.
    ///
    /// Returns whether the result was kept.
    pub fn push(&self, result: RuleResult) -> bool {
        if result.found_paths.is_empty() {
            return false;
        }
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.total_size += result.total_size;
        inner.results.push(result);
        true
    }

    /// Number of results recorded so far.
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .results
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consume the sink once every worker has finished.
    pub fn into_results(self) -> ScanResults {
        let inner = self.inner.into_inner().unwrap_or_else(PoisonError::into_inner);
        ScanResults {
            results: inner.results,
            total_size: inner.total_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{CleanupRule, RiskLevel};
    use std::path::PathBuf;

    fn result(name: &str, size: u64, paths: usize) -> RuleResult {
        RuleResult {
            rule: CleanupRule {
                name: name.to_string(),
                category: "Test".to_string(),
                paths: vec![],
                risk_level: RiskLevel::Safe,
                description: String::new(),
                explanation: String::new(),
                rule_version: "1.0.0".to_string(),
                introduced_in: "0.1.0".to_string(),
            },
            found_paths: (0..paths).map(|i| PathBuf::from(format!("/p{i}"))).collect(),
            total_size: size,
        }
    }

    #[test]
    fn test_push_accumulates_total() {
        let sink = ResultSink::new();
        assert!(sink.push(result("a", 100, 1)));
        assert!(sink.push(result("b", 250, 2)));

        let results = sink.into_results();
        assert_eq!(results.results.len(), 2);
        assert_eq!(results.total_size, 350);
    }

    #[test]
    fn test_empty_results_are_dropped() {
        let sink = ResultSink::new();
        assert!(!sink.push(result("empty", 0, 0)));
        assert!(sink.is_empty());
        assert_eq!(sink.into_results().total_size, 0);
    }

    #[test]
    fn test_concurrent_pushes() {
        let sink = ResultSink::new();
        rayon::scope(|s| {
            for i in 0..64u64 {
                let sink = &sink;
                s.spawn(move |_| {
                    sink.push(result(&format!("r{i}"), i, 1));
                });
            }
        });

        let results = sink.into_results();
        assert_eq!(results.results.len(), 64);
        assert_eq!(results.total_size, (0..64u64).sum::<u64>());
    }
}
