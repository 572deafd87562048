//! BDD-style scenario tests for cireport-coverage.

use std::fs;

use cireport_coverage::{CoverageSource, load, parse_lcov};
use cireport_settings::CoverageFilter;
use tempfile::TempDir;

// ============================================================================
// Scenario: LCOV from a build directory
// ============================================================================

#[test]
fn given_nested_lcov_info_when_loading_dir_then_it_is_found() {
    // Given a build dir with the tracefile nested a few levels down
    let tmp = TempDir::new().unwrap();
    let info = tmp.path().join("build/coverage/lcov.info");
    fs::create_dir_all(info.parent().unwrap()).unwrap();
    fs::write(&info, "SF:/repo/server/a.cpp\nFNF:2\nFNH:2\nLF:4\nLH:3\nend_of_record\n").unwrap();
    // When loading the directory
    let (summary, source) = load(tmp.path(), &CoverageFilter::default()).unwrap();
    // Then the tracefile is used
    assert_eq!(source, CoverageSource::Lcov(info));
    assert_eq!(summary.line_coverage, 75.0);
    assert_eq!(summary.function_coverage, 100.0);
}

#[test]
fn given_vcpkg_sources_when_parsing_then_they_are_excluded() {
    let text = "SF:/b/vcpkg_installed/x64-linux/include/fmt/core.h\nLF:50\nLH:0\nend_of_record\n\
                SF:/repo/client/main.cpp\nLF:10\nLH:10\nend_of_record\n";
    let summary = parse_lcov(text, &CoverageFilter::default());
    assert_eq!(summary.files.len(), 1);
    assert_eq!(summary.line_coverage, 100.0);
}

#[test]
fn given_include_dirs_when_nothing_matches_then_percentages_stay_zero() {
    let text = "SF:/repo/tools/gen.cpp\nLF:10\nLH:5\nend_of_record\n";
    let filter = CoverageFilter::default().with_include_dirs(["client", "server"]);
    let summary = parse_lcov(text, &filter);
    assert!(summary.files.is_empty());
    assert_eq!(summary.line_coverage, 0.0);
    assert_eq!(summary.function_coverage, 0.0);
    assert_eq!(summary.branch_coverage, 0.0);
}

// ============================================================================
// Scenario: gcov fallback
// ============================================================================

#[test]
fn given_only_gcov_files_when_loading_dir_then_gcov_summary_is_used() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("main.cpp.gcov"),
        "        -:    0:Source:main.cpp\n        1:    1:int main() {\n    #####:    2:  return 1;\n",
    )
    .unwrap();
    let (summary, source) = load(tmp.path(), &CoverageFilter::default()).unwrap();
    assert!(matches!(source, CoverageSource::Gcov(_)));
    assert_eq!(summary.lines_covered, 1);
    assert_eq!(summary.lines_total, 2);
}

#[test]
fn given_missing_input_when_loading_then_it_is_rejected() {
    let tmp = TempDir::new().unwrap();
    assert!(load(&tmp.path().join("nope.info"), &CoverageFilter::default()).is_err());
}

// ============================================================================
// Scenario: default include directories
// ============================================================================

#[test]
fn given_default_filter_when_parsing_then_only_client_and_server_are_kept() {
    // Given records from client, server and a shared directory
    let text = "SF:/repo/client/a.cpp\nLF:10\nLH:10\nend_of_record\n\
                SF:/repo/server/b.cpp\nLF:10\nLH:5\nend_of_record\n\
                SF:/repo/common/x.cpp\nLF:10\nLH:0\nend_of_record\n";
    // When parsing with the default filter
    let summary = parse_lcov(text, &CoverageFilter::default());
    // Then the shared directory is dropped
    let paths: Vec<&str> = summary.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["/repo/client/a.cpp", "/repo/server/b.cpp"]);
    assert_eq!(summary.line_coverage, 75.0);
}
