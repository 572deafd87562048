//! Code coverage summaries.

use serde::{Deserialize, Serialize};

/// `covered / total * 100`, or `0.0` when `total` is zero.
pub fn percent(covered: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        covered as f64 / total as f64 * 100.0
    }
}

/// Coverage for a single source file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCoverage {
    pub path: String,
    pub lines_covered: u64,
    pub lines_total: u64,
    pub functions_covered: u64,
    pub functions_total: u64,
    pub line_coverage: f64,
    /// Present only when the record carried branch data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branches_covered: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branches_total: Option<u64>,
}

impl FileCoverage {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Recompute `line_coverage` from the line counts.
    pub fn finalize(&mut self) {
        self.line_coverage = percent(self.lines_covered, self.lines_total);
    }

    pub fn lines_uncovered(&self) -> u64 {
        self.lines_total.saturating_sub(self.lines_covered)
    }
}

/// Aggregated coverage across the kept files.
///
/// Serialized as `coverage.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageSummary {
    pub line_coverage: f64,
    pub function_coverage: f64,
    pub branch_coverage: f64,
    pub lines_covered: u64,
    pub lines_total: u64,
    pub functions_covered: u64,
    pub functions_total: u64,
    pub branches_covered: u64,
    pub branches_total: u64,
    pub files: Vec<FileCoverage>,
}

impl CoverageSummary {
    /// Fold a file record into the totals. Call [`CoverageSummary::finalize`]
    /// once all files are added.
    pub fn add_file(&mut self, file: FileCoverage) {
        self.lines_covered = self.lines_covered.saturating_add(file.lines_covered);
        self.lines_total = self.lines_total.saturating_add(file.lines_total);
        self.functions_covered = self.functions_covered.saturating_add(file.functions_covered);
        self.functions_total = self.functions_total.saturating_add(file.functions_total);
        if file.branches_covered.is_some() {
            self.branches_covered = self.branches_covered.saturating_add(file.branches_covered.unwrap_or(0));
            self.branches_total = self.branches_total.saturating_add(file.branches_total.unwrap_or(0));
        }
        self.files.push(file);
    }

    /// Recompute the overall percentages from the totals.
    pub fn finalize(&mut self) {
        self.line_coverage = percent(self.lines_covered, self.lines_total);
        self.function_coverage = percent(self.functions_covered, self.functions_total);
        self.branch_coverage = percent(self.branches_covered, self.branches_total);
    }

    /// Files under `threshold` line coverage, lowest first.
    pub fn files_below(&self, threshold: f64) -> Vec<&FileCoverage> {
        let mut files: Vec<&FileCoverage> = self
            .files
            .iter()
            .filter(|f| f.line_coverage < threshold)
            .collect();
        files.sort_by(|a, b| a.line_coverage.total_cmp(&b.line_coverage));
        files
    }
}

/// Health bucket for a coverage percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageStatus {
    Good,
    Moderate,
    Low,
}

impl CoverageStatus {
    pub fn classify(pct: f64, good: f64, moderate: f64) -> Self {
        if pct >= good {
            CoverageStatus::Good
        } else if pct >= moderate {
            CoverageStatus::Moderate
        } else {
            CoverageStatus::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str, covered: u64, total: u64) -> FileCoverage {
        let mut f = FileCoverage {
            path: path.into(),
            lines_covered: covered,
            lines_total: total,
            ..FileCoverage::default()
        };
        f.finalize();
        f
    }

    #[test]
    fn percent_handles_zero_total() {
        assert_eq!(percent(0, 0), 0.0);
        assert_eq!(percent(1, 4), 25.0);
    }

    #[test]
    fn add_file_only_counts_branches_when_present() {
        let mut summary = CoverageSummary::default();
        summary.add_file(file("a.cpp", 5, 10));
        let mut with_branches = file("b.cpp", 1, 2);
        with_branches.branches_covered = Some(3);
        with_branches.branches_total = Some(4);
        summary.add_file(with_branches);
        summary.finalize();

        assert_eq!(summary.lines_covered, 6);
        assert_eq!(summary.lines_total, 12);
        assert_eq!(summary.branches_covered, 3);
        assert_eq!(summary.branches_total, 4);
        assert_eq!(summary.branch_coverage, 75.0);
        assert_eq!(summary.line_coverage, 50.0);
    }

    #[test]
    fn add_file_saturates_totals() {
        let mut summary = CoverageSummary::default();
        summary.add_file(file("a.cpp", u64::MAX, u64::MAX));
        summary.add_file(file("b.cpp", 1, 2));
        assert_eq!(summary.lines_covered, u64::MAX);
        assert_eq!(summary.lines_total, u64::MAX);
    }

    #[test]
    fn files_below_sorts_ascending() {
        let mut summary = CoverageSummary::default();
        summary.add_file(file("high.cpp", 9, 10));
        summary.add_file(file("mid.cpp", 5, 10));
        summary.add_file(file("low.cpp", 1, 10));
        let below: Vec<&str> = summary
            .files_below(80.0)
            .iter()
            .map(|f| f.path.as_str())
            .collect();
        assert_eq!(below, vec!["low.cpp", "mid.cpp"]);
    }

    #[test]
    fn classify_uses_inclusive_thresholds() {
        assert_eq!(CoverageStatus::classify(80.0, 80.0, 60.0), CoverageStatus::Good);
        assert_eq!(
            CoverageStatus::classify(60.0, 80.0, 60.0),
            CoverageStatus::Moderate
        );
        assert_eq!(CoverageStatus::classify(59.9, 80.0, 60.0), CoverageStatus::Low);
    }

    #[test]
    fn file_branch_fields_are_omitted_when_absent() {
        let json = serde_json::to_value(file("a.cpp", 1, 1)).unwrap();
        assert!(json.get("branches_total").is_none());
        assert_eq!(json["line_coverage"], 100.0);
    }
}
