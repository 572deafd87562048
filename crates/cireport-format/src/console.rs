//! Plain-text reports printed to the job log.

use std::fmt::Write;

use cireport_coverage::GcovReport;
use cireport_types::{CoverageSummary, Finding, Severity, SeverityCounts, TestSummary};

use crate::bar;

fn rule(width: usize) -> String {
    "=".repeat(width)
}

/// Recap printed after writing `test-results.json`.
pub fn tests_recap(t: &TestSummary, output: &str) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "\n{}", rule(60));
    let _ = writeln!(s, "✅ Test results written to {output}");
    let _ = writeln!(s, "{}", rule(60));
    let _ = writeln!(s, "   Total:    {}", t.total);
    let _ = writeln!(s, "   Passed:   {}", t.passed);
    let _ = writeln!(s, "   Failed:   {}", t.failed);
    let _ = writeln!(s, "   Skipped:  {}", t.skipped);
    let _ = writeln!(s, "   Duration: {:.2}s", t.duration);
    let _ = writeln!(s, "{}", rule(60));

    if t.total == 0 {
        s.push_str("\n⚠️  WARNING: No tests were found!\n");
        s.push_str("   Possible causes:\n");
        s.push_str("   - Tests didn't run successfully\n");
        s.push_str("   - CTest output files are missing\n");
        s.push_str("   - Test XML files are in unexpected locations\n");
    }
    s
}

/// Recap printed after writing `coverage.json`.
pub fn coverage_recap(c: &CoverageSummary, output: &str) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "✅ Coverage data written to {output}");
    let _ = writeln!(s, "   Line Coverage: {:.1}%", c.line_coverage);
    let _ = writeln!(s, "   Function Coverage: {:.1}%", c.function_coverage);
    let _ = writeln!(s, "   Lines: {}/{}", c.lines_covered, c.lines_total);
    let _ = writeln!(s, "   Functions: {}/{}", c.functions_covered, c.functions_total);
    let _ = writeln!(s, "   Files analyzed: {}", c.files.len());
    s
}

/// Statistics block printed after `codeql summarize`.
pub fn findings_statistics(findings: &[Finding]) -> String {
    let mut counts = SeverityCounts::default();
    for f in findings {
        counts.add(f.severity.as_str());
    }

    let mut s = String::new();
    let _ = writeln!(s, "\n{}", rule(60));
    s.push_str("Summary Statistics:\n");
    for sev in Severity::ALL {
        let count = counts.level(sev);
        if count > 0 {
            let _ = writeln!(s, "  {}: {count}", sev.title());
        }
    }
    let _ = writeln!(s, "  Total: {}", findings.len());
    let _ = writeln!(s, "{}", rule(60));
    s
}

/// Findings summary printed by `codeql check`.
pub fn check_summary(counts: &SeverityCounts) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "\n{}", rule(60));
    s.push_str("CodeQL Findings Summary\n");
    let _ = writeln!(s, "{}", rule(60));

    if counts.is_empty() {
        s.push_str("✅ No findings detected\n");
        return s;
    }

    for sev in Severity::ALL {
        let count = counts.level(sev);
        if count > 0 {
            let _ = writeln!(s, "{} {}: {count}", sev.emoji(), sev.as_str().to_uppercase());
        }
    }
    for (sev, count) in counts.unknown() {
        if count > 0 {
            let _ = writeln!(s, "⚪ {}: {count}", sev.to_uppercase());
        }
    }

    let _ = writeln!(s, "\n📈 Total findings: {}", counts.total());
    let _ = writeln!(s, "{}\n", rule(60));
    s
}

const GCOV_BAR_WIDTH: usize = 50;
const GCOV_PRIORITY_COUNT: usize = 5;

fn gcov_status(pct: f64, target: f64) -> &'static str {
    if pct >= target {
        "✅"
    } else if pct >= 50.0 {
        "⚠️ "
    } else {
        "❌"
    }
}

/// The gcov console report: per-file bars, totals, and the files to
/// improve first when the target is missed.
pub fn gcov_report(report: &GcovReport, target: f64, source_filter: &str) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "{}", rule(90));
    let _ = writeln!(s, "CODE COVERAGE (sources under {source_filter} only)");
    let _ = writeln!(s, "{}", rule(90));
    s.push('\n');

    for (name, stat) in report.by_percent() {
        let filled = if stat.percent > 0.0 {
            (stat.percent / 2.0) as usize
        } else {
            0
        };
        let _ = writeln!(
            s,
            "{} {name:<40} {} {:5.1}% ({:3}/{:3})",
            gcov_status(stat.percent, target),
            bar(filled, GCOV_BAR_WIDTH),
            stat.percent,
            stat.covered,
            stat.total
        );
    }

    let total = report.total();
    if total == 0 {
        return s;
    }

    let covered = report.covered();
    let overall = report.overall();
    s.push('\n');
    let _ = writeln!(s, "{}", rule(90));
    let _ = writeln!(s, "TOTAL: {covered}/{total} lines covered");
    let _ = writeln!(s, "OVERALL COVERAGE: {overall:.2}%");
    let _ = writeln!(s, "{}", rule(90));
    s.push('\n');

    if overall >= target {
        let _ = writeln!(s, "✅ TARGET {target}% REACHED! 🎉🎉🎉");
        return s;
    }

    let _ = writeln!(s, "⚠️  {:.1}% short of the {target}% target", target - overall);
    let _ = writeln!(
        s,
        "   About {} more lines to cover",
        report.lines_needed(target)
    );
    s.push('\n');
    s.push_str("Priority files to improve (by potential impact):\n");
    for (i, p) in report
        .priorities(target)
        .iter()
        .take(GCOV_PRIORITY_COUNT)
        .enumerate()
    {
        let _ = writeln!(
            s,
            "  {}. {:<35} {:5.1}% → {target}% = +{:3} lines (impact: {:.0})",
            i + 1,
            p.name,
            p.percent,
            p.gain,
            p.impact
        );
    }
    s
}
