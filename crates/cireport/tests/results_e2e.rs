//! End-to-end tests for `cireport tests` and `cireport coverage`.

mod common;

use std::fs;

use common::{cireport, ctest_xml, write};
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

// ── tests ────────────────────────────────────────────────────────────

#[test]
fn tests_writes_merged_summary_json() {
    let tmp = tempdir().unwrap();
    write(tmp.path(), "build/Testing/20240101-0800/Test.xml", &ctest_xml(3, &["broken"]));
    write(
        tmp.path(),
        "build/tests/test_detail.xml",
        r#"<testsuites><testsuite name="Math" tests="1" failures="0" time="0.25">
<testcase name="Adds" classname="Math" status="run" time="0.25"/>
</testsuite></testsuites>"#,
    );

    cireport(tmp.path())
        .args(["tests", "build", "-o", "out/results.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("📊 Parsing test results..."))
        .stdout(predicate::str::contains("Found 1 GTest XML files"))
        .stdout(predicate::str::contains("✅ Test results written to out/results.json"));

    let json: Value =
        serde_json::from_str(&fs::read_to_string(tmp.path().join("out/results.json")).unwrap())
            .unwrap();
    assert_eq!(json["failed"], 1);
    assert_eq!(json["failed_tests"][0], "broken");
    assert!(json["total"].as_u64().unwrap() >= 4);
}

#[test]
fn tests_with_no_reports_warns_but_succeeds() {
    let tmp = tempdir().unwrap();
    fs::create_dir_all(tmp.path().join("build")).unwrap();

    cireport(tmp.path())
        .args(["tests", "build"])
        .assert()
        .success()
        .stdout(predicate::str::contains("WARNING: No tests were found!"));

    assert!(tmp.path().join("test-results.json").is_file());
}

#[test]
fn tests_missing_build_dir_fails_with_hints() {
    let tmp = tempdir().unwrap();

    cireport(tmp.path())
        .args(["tests", "no-such-build"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Build directory not found"))
        .stderr(predicate::str::contains("Hints:"));
}

// ── coverage ─────────────────────────────────────────────────────────

const LCOV: &str = "SF:/repo/server/a.cpp\nFNF:2\nFNH:1\nLF:4\nLH:3\nend_of_record\n\
SF:/repo/server/vcpkg_installed/include/x.h\nLF:10\nLH:0\nend_of_record\n";

#[test]
fn coverage_from_info_file_writes_summary() {
    let tmp = tempdir().unwrap();
    write(tmp.path(), "coverage.info", LCOV);

    cireport(tmp.path())
        .args(["coverage", "coverage.info", "-o", "cov.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✅ Coverage data written to cov.json"))
        .stdout(predicate::str::contains("Line Coverage: 75.0%"));

    let json: Value =
        serde_json::from_str(&fs::read_to_string(tmp.path().join("cov.json")).unwrap()).unwrap();
    assert_eq!(json["lines_total"], 4);
    assert_eq!(json["files"].as_array().unwrap().len(), 1);
}

#[test]
fn coverage_include_filter_drops_other_directories() {
    let tmp = tempdir().unwrap();
    write(
        tmp.path(),
        "coverage.info",
        "SF:/repo/server/a.cpp\nLF:2\nLH:2\nend_of_record\nSF:/repo/tools/b.cpp\nLF:2\nLH:0\nend_of_record\n",
    );

    cireport(tmp.path())
        .args(["coverage", "coverage.info", "--include", "server"])
        .assert()
        .success();

    let json: Value =
        serde_json::from_str(&fs::read_to_string(tmp.path().join("coverage.json")).unwrap())
            .unwrap();
    assert_eq!(json["line_coverage"], 100.0);
    assert_eq!(json["files"][0]["path"], "/repo/server/a.cpp");
}

#[test]
fn coverage_rejects_unknown_input() {
    let tmp = tempdir().unwrap();
    write(tmp.path(), "report.txt", "nothing");

    cireport(tmp.path())
        .args(["coverage", "report.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid coverage input"))
        .stderr(predicate::str::contains("Hints:"));
}
