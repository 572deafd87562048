//! # cireport-testresults
//!
//! **Tier 2 (Report Parsing)**
//!
//! Turns CTest and GoogleTest output found in a build directory into a
//! single [`TestSummary`].
//!
//! ## What belongs here
//! * CTest `Test.xml` parsing and the `LastTest.log` fallback
//! * GoogleTest XML parsing
//! * Discovery of report files inside a build tree
//!
//! ## What does NOT belong here
//! * Rendering (use cireport-format)
//! * Writing the JSON summary (the binary does that)

pub mod ctest;
pub mod gtest;

use std::path::{Path, PathBuf};

use cireport_types::TestSummary;
use thiserror::Error;

pub use ctest::{parse_ctest_dir, parse_ctest_xml, parse_last_test_log};
pub use gtest::{parse_gtest_file, parse_gtest_xml};

/// GoogleTest report names searched for under the build directory.
pub const GTEST_PATTERNS: [&str; 3] = ["**/test_detail.xml", "**/*_results.xml", "**/gtest_*.xml"];

/// Errors from reading test reports.
#[derive(Debug, Error)]
pub enum TestReportError {
    #[error("Build directory not found: {0}")]
    BuildDirMissing(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("No <Testing> results in CTest report")]
    MissingTesting,

    #[error("Failed to search for reports: {0}")]
    Discovery(String),
}

/// Everything [`collect`] found in a build directory.
#[derive(Debug, Clone, Default)]
pub struct CollectedResults {
    /// CTest results, possibly merged with GoogleTest results.
    pub summary: TestSummary,
    /// GoogleTest report files that were merged in.
    pub gtest_files: Vec<PathBuf>,
}

/// GoogleTest report files under `build_dir`, sorted and deduplicated.
pub fn discover_gtest_files(build_dir: &Path) -> Result<Vec<PathBuf>, TestReportError> {
    cireport_walk::find_files(build_dir, &GTEST_PATTERNS)
        .map_err(|e| TestReportError::Discovery(format!("{e:#}")))
}

/// Parse CTest output and every GoogleTest report in `build_dir`.
pub fn collect(build_dir: &Path) -> Result<CollectedResults, TestReportError> {
    if !build_dir.exists() {
        return Err(TestReportError::BuildDirMissing(build_dir.to_path_buf()));
    }

    let ctest = parse_ctest_dir(build_dir);

    let gtest_files = discover_gtest_files(build_dir)?;
    tracing::info!(count = gtest_files.len(), "found GoogleTest XML files");

    let summary = if gtest_files.is_empty() {
        ctest
    } else {
        let mut merged = ctest;
        for file in &gtest_files {
            merged.merge(&parse_gtest_file(file));
        }
        tracing::info!("merged CTest and GoogleTest results");
        merged
    };

    Ok(CollectedResults {
        summary,
        gtest_files,
    })
}

pub(crate) fn read_text(path: &Path) -> Result<String, TestReportError> {
    std::fs::read_to_string(path).map_err(|source| TestReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
