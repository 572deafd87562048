//! Unit test run summaries.

use serde::{Deserialize, Serialize};

/// Aggregated result of one or more test reports.
///
/// Serialized as `test-results.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestSummary {
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    pub skipped: u64,
    /// Wall time in seconds.
    pub duration: f64,
    /// Names of failed tests, in report order.
    pub failed_tests: Vec<String>,
}

/// Overall outcome of a test run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestStatus {
    /// At least one test failed.
    Failed,
    /// Every test passed and at least one ran.
    Passed,
    /// Nothing failed, but not everything passed (skips, or no tests at all).
    Completed,
}

impl TestSummary {
    /// Add another summary into this one.
    pub fn merge(&mut self, other: &TestSummary) {
        self.total = self.total.saturating_add(other.total);
        self.passed = self.passed.saturating_add(other.passed);
        self.failed = self.failed.saturating_add(other.failed);
        self.skipped = self.skipped.saturating_add(other.skipped);
        self.duration += other.duration;
        self.failed_tests.extend(other.failed_tests.iter().cloned());
    }

    /// Merge a sequence of summaries into a fresh one.
    pub fn merged<'a, I>(parts: I) -> TestSummary
    where
        I: IntoIterator<Item = &'a TestSummary>,
    {
        let mut out = TestSummary::default();
        for part in parts {
            out.merge(part);
        }
        out
    }

    /// Pass rate in percent, `None` when no tests ran.
    pub fn pass_rate(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.passed as f64 / self.total as f64 * 100.0)
        }
    }

    pub fn status(&self) -> TestStatus {
        if self.failed > 0 {
            TestStatus::Failed
        } else if self.passed == self.total && self.total > 0 {
            TestStatus::Passed
        } else {
            TestStatus::Completed
        }
    }

    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }
}
