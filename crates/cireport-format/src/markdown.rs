//! Markdown step summaries for test and coverage results.

use std::fmt::Write;

use cireport_settings::Thresholds;
use cireport_types::{CoverageStatus, CoverageSummary, TestStatus, TestSummary};

use crate::{bar, bar_fill, shorten_path};

const MAX_FAILED_LISTED: usize = 10;
const MAX_ATTENTION_FILES: usize = 5;
const MAX_PATH_CHARS: usize = 60;
const COVERAGE_BAR_WIDTH: usize = 20;

pub fn tests_markdown(t: &TestSummary) -> String {
    let mut s = String::new();

    let (emoji, status) = match t.status() {
        TestStatus::Failed => ("❌", "FAILED"),
        TestStatus::Passed => ("✅", "PASSED"),
        TestStatus::Completed => ("⚠️", "COMPLETED"),
    };

    let _ = writeln!(s, "## {emoji} Unit Test Results\n");
    let _ = writeln!(s, "**Status:** {status}\n");

    s.push_str("| Metric | Value |\n");
    s.push_str("|--------|-------|\n");
    let _ = writeln!(s, "| Total Tests | {} |", t.total);
    let _ = writeln!(s, "| ✅ Passed | {} |", t.passed);
    let _ = writeln!(s, "| ❌ Failed | {} |", t.failed);
    if t.skipped > 0 {
        let _ = writeln!(s, "| ⏭️ Skipped | {} |", t.skipped);
    }
    let _ = writeln!(s, "| ⏱️ Duration | {:.2}s |", t.duration);
    if let Some(rate) = t.pass_rate() {
        let _ = writeln!(s, "| 📊 Pass Rate | {rate:.1}% |");
    }

    if t.failed > 0 {
        s.push_str("\n### ❌ Failed Tests\n\n");
        for name in t.failed_tests.iter().take(MAX_FAILED_LISTED) {
            let _ = writeln!(s, "- `{name}`");
        }
        if t.failed_tests.len() > MAX_FAILED_LISTED {
            let _ = writeln!(
                s,
                "\n...and {} more",
                t.failed_tests.len() - MAX_FAILED_LISTED
            );
        }
    }

    s
}

pub fn coverage_markdown(c: &CoverageSummary, thresholds: &Thresholds) -> String {
    let mut s = String::new();

    let (emoji, status) = match thresholds.classify(c.line_coverage) {
        CoverageStatus::Good => ("✅", "GOOD"),
        CoverageStatus::Moderate => ("⚠️", "MODERATE"),
        CoverageStatus::Low => ("❌", "LOW"),
    };

    let _ = writeln!(s, "## {emoji} Code Coverage\n");
    let _ = writeln!(s, "**Status:** {status} ({:.1}%)\n", c.line_coverage);

    s.push_str("| Metric | Coverage | Covered/Total |\n");
    s.push_str("|--------|----------|---------------|\n");
    let _ = writeln!(
        s,
        "| 📈 Lines | {:.1}% | {}/{} |",
        c.line_coverage, c.lines_covered, c.lines_total
    );
    let _ = writeln!(
        s,
        "| 🔧 Functions | {:.1}% | {}/{} |",
        c.function_coverage, c.functions_covered, c.functions_total
    );

    s.push_str("\n### Line Coverage\n\n");
    let _ = writeln!(
        s,
        "```\n{} {:.1}%\n```",
        bar(bar_fill(c.line_coverage, COVERAGE_BAR_WIDTH), COVERAGE_BAR_WIDTH),
        c.line_coverage
    );

    let attention: Vec<_> = c
        .files_below(thresholds.good)
        .into_iter()
        .take(MAX_ATTENTION_FILES)
        .collect();
    if !attention.is_empty() {
        let _ = writeln!(
            s,
            "\n### 📉 Files Needing Attention (< {}% coverage)\n",
            thresholds.good
        );
        s.push_str("| File | Coverage |\n");
        s.push_str("|------|----------|\n");
        for file in attention {
            let _ = writeln!(
                s,
                "| `{}` | {:.1}% |",
                shorten_path(&file.path, MAX_PATH_CHARS),
                file.line_coverage
            );
        }
    }

    s
}

pub fn combined_markdown(t: &TestSummary, c: &CoverageSummary, thresholds: &Thresholds) -> String {
    let mut s = String::new();

    s.push_str("# 🧪 Tests & Coverage Report\n\n");

    let overall = if t.failed > 0 || c.line_coverage < thresholds.moderate {
        "❌ Issues Detected"
    } else if c.line_coverage >= thresholds.good && t.all_passed() {
        "✅ All Good"
    } else {
        "⚠️ Needs Improvement"
    };
    let _ = writeln!(s, "**Overall Status:** {overall}\n");

    s.push_str("## Quick Stats\n\n");
    s.push_str("| Category | Metric | Value |\n");
    s.push_str("|----------|--------|-------|\n");
    let _ = writeln!(s, "| 🧪 Tests | Passed/Total | {}/{} |", t.passed, t.total);
    let _ = writeln!(s, "| 🧪 Tests | Failed | {} |", t.failed);
    let _ = writeln!(s, "| 📊 Coverage | Line | {:.1}% |", c.line_coverage);
    let _ = writeln!(s, "| 📊 Coverage | Function | {:.1}% |", c.function_coverage);
    let _ = writeln!(s, "| ⏱️ Duration | Test Runtime | {:.2}s |", t.duration);

    s.push_str("\n---\n\n");
    s.push_str(&tests_markdown(t));
    s.push_str("\n---\n\n");
    s.push_str(&coverage_markdown(c, thresholds));

    s
}
