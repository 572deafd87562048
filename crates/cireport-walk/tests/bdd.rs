//! BDD-style scenario tests for cireport-walk.

use std::fs;
use std::path::Path;

use cireport_walk::{find_files, subdirs};
use tempfile::TempDir;

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "x").unwrap();
}

// ============================================================================
// Scenario: build tree discovery
// ============================================================================

#[test]
fn given_build_tree_when_searching_gcov_then_results_are_sorted() {
    // Given gcov files created out of order
    let tmp = TempDir::new().unwrap();
    touch(tmp.path(), "z/last.cpp.gcov");
    touch(tmp.path(), "a/first.cpp.gcov");
    touch(tmp.path(), "m/mid.cpp.gcov");
    // When searching
    let found = find_files(tmp.path(), &["**/*.gcov"]).unwrap();
    // Then results come back in path order
    let names: Vec<_> = found
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["first.cpp.gcov", "mid.cpp.gcov", "last.cpp.gcov"]);
}

#[test]
fn given_ctest_tags_when_listing_subdirs_then_names_sort_lexicographically() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("20240102-1200")).unwrap();
    fs::create_dir_all(tmp.path().join("20240101-0900")).unwrap();
    touch(tmp.path(), "TAG");
    let dirs = subdirs(tmp.path()).unwrap();
    assert_eq!(dirs.len(), 2);
    assert!(dirs[0].ends_with("20240101-0900"));
}

#[test]
fn given_hidden_directory_when_searching_then_it_is_included() {
    let tmp = TempDir::new().unwrap();
    touch(tmp.path(), ".cache/lcov.info");
    let found = find_files(tmp.path(), &["**/lcov.info"]).unwrap();
    assert_eq!(found.len(), 1);
}
