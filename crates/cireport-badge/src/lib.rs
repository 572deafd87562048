//! SVG badge rendering helpers.

use cireport_settings::Thresholds;
use cireport_types::{CoverageStatus, TestStatus, TestSummary};

/// Fill color of the value segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeColor {
    Green,
    Yellow,
    Red,
    Blue,
}

impl BadgeColor {
    pub fn hex(self) -> &'static str {
        match self {
            BadgeColor::Green => "#4c1",
            BadgeColor::Yellow => "#dfb317",
            BadgeColor::Red => "#e05d44",
            BadgeColor::Blue => "#4c9aff",
        }
    }

    pub fn for_coverage(pct: f64, thresholds: &Thresholds) -> Self {
        match thresholds.classify(pct) {
            CoverageStatus::Good => BadgeColor::Green,
            CoverageStatus::Moderate => BadgeColor::Yellow,
            CoverageStatus::Low => BadgeColor::Red,
        }
    }

    pub fn for_tests(summary: &TestSummary) -> Self {
        match summary.status() {
            TestStatus::Failed => BadgeColor::Red,
            TestStatus::Passed => BadgeColor::Green,
            TestStatus::Completed => BadgeColor::Yellow,
        }
    }
}

/// Escape text for SVG element content.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn segment_width(text: &str) -> i32 {
    (text.chars().count() as i32 * 7 + 20).max(60)
}

/// Build a compact two-segment SVG badge.
pub fn badge_svg(label: &str, value: &str, color: BadgeColor) -> String {
    let label_width = segment_width(label);
    let value_width = segment_width(value);
    let width = label_width + value_width;
    let height = 20;
    let label_x = label_width / 2;
    let value_x = label_width + value_width / 2;
    let fill = color.hex();
    let label = escape_xml(label);
    let value = escape_xml(value);
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" role=\"img\" aria-label=\"{label}: {value}\"><rect width=\"{label_width}\" height=\"{height}\" fill=\"#555\"/><rect x=\"{label_width}\" width=\"{value_width}\" height=\"{height}\" fill=\"{fill}\"/><text x=\"{label_x}\" y=\"14\" fill=\"#fff\" font-family=\"Verdana\" font-size=\"11\" text-anchor=\"middle\">{label}</text><text x=\"{value_x}\" y=\"14\" fill=\"#fff\" font-family=\"Verdana\" font-size=\"11\" text-anchor=\"middle\">{value}</text></svg>"
    )
}

/// `coverage | 83.4%` colored by `thresholds`.
pub fn coverage_badge(label: &str, pct: f64, thresholds: &Thresholds) -> String {
    badge_svg(
        label,
        &format!("{pct:.1}%"),
        BadgeColor::for_coverage(pct, thresholds),
    )
}

/// `tests | 42 passed`, `tests | 3 failed`, or `tests | no tests`.
pub fn tests_badge(summary: &TestSummary) -> String {
    let value = if summary.total == 0 {
        "no tests".to_string()
    } else if summary.failed > 0 {
        format!("{} failed", summary.failed)
    } else {
        format!("{}/{} passed", summary.passed, summary.total)
    };
    badge_svg("tests", &value, BadgeColor::for_tests(summary))
}
