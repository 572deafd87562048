//! CTest output: `Testing/<tag>/Test.xml` with a `LastTest.log` fallback.

use std::path::Path;
use std::sync::LazyLock;

use cireport_types::TestSummary;
use regex::Regex;
use roxmltree::{Document, Node};

use crate::{TestReportError, read_text};

static CONSOLE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*\d+/\d+\s+Test\s+#\d+:\s+(?P<name>\S+).*?(?P<outcome>\*\*\*Failed|\*\*\*Timeout|\*\*\*Exception|(?:\*\*\*)?Not Run|\*\*\*Skipped|\sPassed)",
    )
    .expect("valid regex literal")
});

fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(tag))
}

/// Wall time recorded in `Results/NamedMeasurement[@name="Execution Time"]/Value`.
fn execution_time(test: Node<'_, '_>) -> Option<f64> {
    test.descendants()
        .filter(|n| n.has_tag_name("Results"))
        .flat_map(|results| results.children())
        .filter(|n| {
            n.has_tag_name("NamedMeasurement") && n.attribute("name") == Some("Execution Time")
        })
        .find_map(|m| child(m, "Value"))
        .and_then(|v| v.text())
        .and_then(|t| t.trim().parse::<f64>().ok())
}

/// Parse a CTest `Test.xml` document.
///
/// Only `<Test>` elements carrying a `Status` attribute are counted; the
/// bare `<TestList><Test>` entries are names, not results. A `<Testing>`
/// element without any child elements is treated as missing.
pub fn parse_ctest_xml(text: &str) -> Result<TestSummary, TestReportError> {
    let doc = Document::parse(text)?;
    let root = doc.root_element();
    let testing = if root.has_tag_name("Testing") {
        root
    } else {
        child(root, "Testing").ok_or(TestReportError::MissingTesting)?
    };
    if !testing.children().any(|n| n.is_element()) {
        return Err(TestReportError::MissingTesting);
    }

    let mut summary = TestSummary::default();
    for test in testing.descendants().filter(|n| n.has_tag_name("Test")) {
        let Some(status) = test.attribute("Status") else {
            continue;
        };
        summary.total += 1;
        match status {
            "passed" => summary.passed += 1,
            "failed" => {
                summary.failed += 1;
                let name = test
                    .descendants()
                    .find(|n| n.has_tag_name("Name"))
                    .and_then(|n| n.text())
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .unwrap_or("Unknown");
                summary.failed_tests.push(name.to_string());
            }
            _ => summary.skipped += 1,
        }
        if let Some(secs) = execution_time(test) {
            summary.duration += secs;
        }
    }
    Ok(summary)
}

/// Parse CTest console output as captured in `LastTest.log`.
pub fn parse_last_test_log(text: &str) -> TestSummary {
    let mut summary = TestSummary::default();
    for line in text.lines() {
        let Some(caps) = CONSOLE_LINE.captures(line) else {
            continue;
        };
        let name = &caps["name"];
        let outcome = caps["outcome"].trim_start();
        summary.total += 1;
        match outcome {
            "Passed" => {
                summary.passed += 1;
                tracing::debug!(test = name, "passed");
            }
            "***Failed" | "***Timeout" | "***Exception" => {
                summary.failed += 1;
                summary.failed_tests.push(name.to_string());
                tracing::debug!(test = name, outcome, "failed");
            }
            _ => summary.skipped += 1,
        }
    }
    summary
}

/// Parse the newest CTest run under `build_dir/Testing`.
///
/// Tag directories are ordered by name, newest last. When the XML is
/// missing or unusable, `Testing/Temporary/LastTest.log` is tried instead.
/// Nothing found yields an empty summary.
pub fn parse_ctest_dir(build_dir: &Path) -> TestSummary {
    let testing_dir = build_dir.join("Testing");
    tracing::info!(dir = %testing_dir.display(), "looking for CTest results");

    if !testing_dir.exists() {
        tracing::warn!(dir = %testing_dir.display(), "Testing directory does not exist");
        return TestSummary::default();
    }

    let xml_files = cireport_walk::find_files(&testing_dir, &["*/Test.xml"]).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to list Test.xml files");
        Vec::new()
    });
    tracing::info!(count = xml_files.len(), "found Test.xml files");

    if let Some(newest) = xml_files.last() {
        tracing::info!(file = %newest.display(), "parsing CTest XML");
        match read_text(newest).and_then(|text| parse_ctest_xml(&text)) {
            Ok(summary) => {
                tracing::info!(total = summary.total, "parsed tests from XML");
                return summary;
            }
            Err(e) => tracing::warn!(file = %newest.display(), error = %e, "CTest XML unusable"),
        }
    }

    let log = testing_dir.join("Temporary").join("LastTest.log");
    tracing::info!(file = %log.display(), "trying LastTest.log fallback");
    if !log.exists() {
        tracing::warn!(file = %log.display(), "LastTest.log not found");
        return TestSummary::default();
    }
    match read_text(&log) {
        Ok(text) => {
            let summary = parse_last_test_log(&text);
            tracing::info!(total = summary.total, "parsed tests from LastTest.log");
            summary
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to read LastTest.log");
            TestSummary::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SITE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Site BuildName="linux" Name="ci">
  <Testing>
    <TestList>
      <Test>./tests/net_test</Test>
      <Test>./tests/db_test</Test>
    </TestList>
    <Test Status="passed">
      <Name>net_test</Name>
      <Results>
        <NamedMeasurement type="numeric/double" name="Execution Time"><Value>1.25</Value></NamedMeasurement>
      </Results>
    </Test>
    <Test Status="failed">
      <Name>db_test</Name>
      <Results>
        <NamedMeasurement type="numeric/double" name="Execution Time"><Value>0.75</Value></NamedMeasurement>
      </Results>
    </Test>
    <Test Status="notrun">
      <Name>gpu_test</Name>
    </Test>
  </Testing>
</Site>"#;

    #[test]
    fn counts_tests_with_status_only() {
        let summary = parse_ctest_xml(SITE).unwrap();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed_tests, vec!["db_test"]);
        assert!((summary.duration - 2.0).abs() < 1e-9);
    }

    #[test]
    fn missing_testing_element_is_an_error() {
        let err = parse_ctest_xml("<Site/>").unwrap_err();
        assert!(matches!(err, TestReportError::MissingTesting));
    }

    #[test]
    fn empty_testing_element_counts_as_missing() {
        for xml in ["<Site><Testing/></Site>", "<Site><Testing>\n  </Testing></Site>"] {
            let err = parse_ctest_xml(xml).unwrap_err();
            assert!(matches!(err, TestReportError::MissingTesting), "{xml}");
        }
    }

    #[test]
    fn malformed_xml_is_an_error() {
        assert!(matches!(
            parse_ctest_xml("<Site><Testing>").unwrap_err(),
            TestReportError::Xml(_)
        ));
    }

    #[test]
    fn failed_test_without_name_is_unknown() {
        let xml = r#"<Site><Testing><Test Status="failed"/></Testing></Site>"#;
        assert_eq!(parse_ctest_xml(xml).unwrap().failed_tests, vec!["Unknown"]);
    }

    #[test]
    fn non_numeric_execution_time_is_ignored() {
        let xml = r#"<Site><Testing><Test Status="passed"><Name>a</Name><Results>
            <NamedMeasurement name="Execution Time"><Value>fast</Value></NamedMeasurement>
            </Results></Test></Testing></Site>"#;
        assert_eq!(parse_ctest_xml(xml).unwrap().duration, 0.0);
    }

    #[test]
    fn last_test_log_counts_every_outcome() {
        let log = "\
1/5 Test #1: net_test .........................   Passed    0.01 sec
2/5 Test #2: db_test ..........................***Failed    0.20 sec
3/5 Test #3: slow_test ........................***Timeout  60.00 sec
4/5 Test #4: crash_test .......................***Exception: SegFault  0.01 sec
5/5 Test #5: gpu_test .........................***Not Run (Disabled)   0.00 sec
Some unrelated line Passed
";
        let summary = parse_last_test_log(log);
        assert_eq!(summary.total, 5);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 3);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed_tests, vec!["db_test", "slow_test", "crash_test"]);
    }
}
