//! # cireport-coverage
//!
//! **Tier 2 (Report Parsing)**
//!
//! Coverage inputs into a [`CoverageSummary`]: LCOV tracefiles, annotated
//! `.gcov` sources, and the per-file summary `gcov` prints on stdout.
//!
//! ## What belongs here
//! * LCOV `.info` parsing with include/exclude filtering
//! * `.gcov` annotated-source fallback
//! * Running `gcov` over `.gcda` files and the resulting report model
//!
//! ## What does NOT belong here
//! * Rendering (use cireport-format)
//! * Writing JSON (the binary does that)

pub mod gcov;
pub mod gcov_report;
pub mod lcov;

use std::path::{Path, PathBuf};

use cireport_settings::CoverageFilter;
use cireport_types::CoverageSummary;
use thiserror::Error;

pub use gcov::{parse_gcov_dir, parse_gcov_text};
pub use gcov_report::{GcovFileStat, GcovReport, Priority, parse_gcov_stdout, run_gcov};
pub use lcov::{parse_lcov, parse_lcov_file};

/// Errors from reading coverage inputs.
#[derive(Debug, Error)]
pub enum CoverageError {
    #[error("Invalid coverage input (expected a .info file or a directory): {0}")]
    InvalidInput(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to run gcov: {0}")]
    Gcov(#[source] std::io::Error),

    #[error("Failed to search for coverage files: {0}")]
    Discovery(String),
}

/// Where a summary was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverageSource {
    Lcov(PathBuf),
    Gcov(PathBuf),
}

/// Load coverage from an `.info` file or a directory.
///
/// For a directory, the first `coverage.info` wins, then the first
/// `lcov.info`; with neither present every `*.gcov` file is read instead.
pub fn load(
    input: &Path,
    filter: &CoverageFilter,
) -> Result<(CoverageSummary, CoverageSource), CoverageError> {
    let is_info = input.extension().is_some_and(|ext| ext == "info");
    if input.is_file() && is_info {
        return Ok((
            parse_lcov_file(input, filter),
            CoverageSource::Lcov(input.to_path_buf()),
        ));
    }

    if input.is_dir() {
        for pattern in ["**/coverage.info", "**/lcov.info"] {
            let found = cireport_walk::find_first(input, pattern)
                .map_err(|e| CoverageError::Discovery(format!("{e:#}")))?;
            if let Some(info) = found {
                tracing::info!(file = %info.display(), "found LCOV file");
                let summary = parse_lcov_file(&info, filter);
                return Ok((summary, CoverageSource::Lcov(info)));
            }
        }
        tracing::info!("no LCOV file found, trying gcov");
        let summary = parse_gcov_dir(input)?;
        return Ok((summary, CoverageSource::Gcov(input.to_path_buf())));
    }

    Err(CoverageError::InvalidInput(input.to_path_buf()))
}

pub(crate) fn read_lossy(path: &Path) -> Result<String, CoverageError> {
    std::fs::read(path)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .map_err(|source| CoverageError::Io {
            path: path.to_path_buf(),
            source,
        })
}
