//! # cireport-format
//!
//! **Tier 3 (Formatting)**
//!
//! Pure renderers: every function takes parsed data and returns a
//! `String`. Where the output lands (step summary file, stdout) is the
//! binary's concern.
//!
//! ## What belongs here
//! * Markdown step summaries for tests and coverage
//! * The HTML findings table and GitHub workflow annotations
//! * Console recaps and the gcov coverage report
//!
//! ## What does NOT belong here
//! * File or environment I/O
//! * Parsing reports
//! * Discord payloads (use cireport-notify)

pub mod annotations;
pub mod console;
pub mod html;
pub mod markdown;

pub use annotations::{Annotation, AnnotationLevel, annotations};
pub use html::{escape_html, findings_html};
pub use markdown::{combined_markdown, coverage_markdown, tests_markdown};

/// `filled` solid cells followed by empty cells up to `width`.
pub fn bar(filled: usize, width: usize) -> String {
    let filled = filled.min(width);
    let mut s = String::with_capacity(width * 3);
    for _ in 0..filled {
        s.push('█');
    }
    for _ in filled..width {
        s.push('░');
    }
    s
}

/// Filled cells for `pct` on a bar `width` cells wide. Negative or NaN
/// percentages fill nothing.
pub fn bar_fill(pct: f64, width: usize) -> usize {
    let cells = pct / 100.0 * width as f64;
    if cells.is_nan() || cells <= 0.0 {
        0
    } else {
        cells as usize
    }
}

/// Keep at most `max` characters, replacing the head with `...`.
pub fn shorten_path(path: &str, max: usize) -> String {
    let len = path.chars().count();
    if len <= max {
        return path.to_string();
    }
    let keep = max.saturating_sub(3);
    let tail: String = path.chars().skip(len - keep).collect();
    format!("...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_widths() {
        assert_eq!(bar(3, 5), "███░░");
        assert_eq!(bar(9, 4), "████");
        assert_eq!(bar(0, 2), "░░");
    }

    #[test]
    fn bar_fill_truncates() {
        assert_eq!(bar_fill(74.9, 20), 14);
        assert_eq!(bar_fill(100.0, 20), 20);
        assert_eq!(bar_fill(-3.0, 20), 0);
    }

    #[test]
    fn shorten_keeps_tail() {
        let long = "a".repeat(10) + &"b".repeat(57);
        let short = shorten_path(&long, 60);
        assert_eq!(short.chars().count(), 60);
        assert!(short.starts_with("..."));
        assert!(short.ends_with(&"b".repeat(57)));
        assert_eq!(shorten_path("src/x.cpp", 60), "src/x.cpp");
    }
}
