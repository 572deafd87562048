//! GoogleTest XML (`--gtest_output=xml`) parsing.

use std::path::Path;
use std::str::FromStr;

use cireport_types::TestSummary;
use roxmltree::{Document, Node};

use crate::{TestReportError, read_text};

fn attr<T: FromStr + Default>(node: Node<'_, '_>, name: &str) -> T {
    node.attribute(name)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or_default()
}

fn has_failure(case: Node<'_, '_>) -> bool {
    case.children()
        .any(|n| n.has_tag_name("failure") || n.has_tag_name("error"))
}

/// Parse a GoogleTest (JUnit-style) report.
///
/// Works for both a `<testsuites>` root and a lone `<testsuite>` root.
/// Disabled tests count as skipped.
pub fn parse_gtest_xml(text: &str) -> Result<TestSummary, TestReportError> {
    let doc = Document::parse(text)?;
    let mut summary = TestSummary::default();

    for suite in doc
        .root_element()
        .descendants()
        .filter(|n| n.has_tag_name("testsuite"))
    {
        let tests: u64 = attr(suite, "tests");
        let failed = attr::<u64>(suite, "failures").saturating_add(attr::<u64>(suite, "errors"));
        let skipped = attr::<u64>(suite, "skipped").saturating_add(attr::<u64>(suite, "disabled"));
        let time: f64 = attr(suite, "time");

        summary.merge(&TestSummary {
            total: tests,
            passed: tests.saturating_sub(failed).saturating_sub(skipped),
            failed,
            skipped,
            duration: time,
            failed_tests: Vec::new(),
        });

        let suite_name = suite.attribute("name").unwrap_or("");
        for case in suite
            .descendants()
            .filter(|n| n.has_tag_name("testcase") && has_failure(*n))
        {
            let case_name = case.attribute("name").unwrap_or("");
            summary.failed_tests.push(format!("{suite_name}.{case_name}"));
        }
    }
    Ok(summary)
}

/// Parse a GoogleTest report file. Unreadable or invalid files give an
/// empty summary.
pub fn parse_gtest_file(path: &Path) -> TestSummary {
    tracing::info!(file = %path.display(), "parsing GoogleTest XML");
    match read_text(path).and_then(|text| parse_gtest_xml(&text)) {
        Ok(summary) => {
            tracing::info!(total = summary.total, "parsed tests from GoogleTest XML");
            summary
        }
        Err(e) => {
            tracing::warn!(file = %path.display(), error = %e, "failed to parse GoogleTest XML");
            TestSummary::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<testsuites tests="5" failures="1" disabled="1" errors="0" time="0.3" name="AllTests">
  <testsuite name="MathTest" tests="3" failures="1" disabled="0" skipped="0" errors="0" time="0.1">
    <testcase name="Adds" status="run" time="0.01" classname="MathTest"/>
    <testcase name="Divides" status="run" time="0.02" classname="MathTest">
      <failure message="expected 2" type=""><![CDATA[math_test.cpp:12]]></failure>
    </testcase>
    <testcase name="Subtracts" status="run" time="0.01" classname="MathTest"/>
  </testsuite>
  <testsuite name="NetTest" tests="2" failures="0" disabled="1" skipped="0" errors="0" time="0.2">
    <testcase name="Connects" status="run" time="0.2" classname="NetTest"/>
    <testcase name="DISABLED_Reconnects" status="notrun" time="0" classname="NetTest"/>
  </testsuite>
</testsuites>"#;

    #[test]
    fn sums_suites() {
        let summary = parse_gtest_xml(REPORT).unwrap();
        assert_eq!(summary.total, 5);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.passed, 3);
        assert!((summary.duration - 0.3).abs() < 1e-9);
        assert_eq!(summary.failed_tests, vec!["MathTest.Divides"]);
    }

    #[test]
    fn lone_testsuite_root_is_counted() {
        let xml = r#"<testsuite name="Solo" tests="2" failures="0" errors="1" time="1.5">
            <testcase name="Boom"><error message="crash"/></testcase>
            <testcase name="Fine"/>
        </testsuite>"#;
        let summary = parse_gtest_xml(xml).unwrap();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed_tests, vec!["Solo.Boom"]);
    }

    #[test]
    fn inconsistent_counts_do_not_underflow() {
        let xml = r#"<testsuites><testsuite name="S" tests="1" failures="3"/></testsuites>"#;
        let summary = parse_gtest_xml(xml).unwrap();
        assert_eq!(summary.passed, 0);
        assert_eq!(summary.failed, 3);
    }

    #[test]
    fn huge_counts_saturate() {
        let xml = r#"<testsuites>
            <testsuite name="A" tests="18446744073709551615" failures="18446744073709551615" errors="5"/>
            <testsuite name="B" tests="10"/>
        </testsuites>"#;
        let summary = parse_gtest_xml(xml).unwrap();
        assert_eq!(summary.total, u64::MAX);
        assert_eq!(summary.failed, u64::MAX);
    }

    #[test]
    fn bad_attributes_default_to_zero() {
        let xml = r#"<testsuites><testsuite name="S" tests="many" time="n/a"/></testsuites>"#;
        assert_eq!(parse_gtest_xml(xml).unwrap(), TestSummary::default());
    }

    #[test]
    fn missing_file_gives_empty_summary() {
        let summary = parse_gtest_file(Path::new("/definitely/not/here.xml"));
        assert_eq!(summary, TestSummary::default());
    }
}
