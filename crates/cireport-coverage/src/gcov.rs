//! Annotated `.gcov` source files, used when no LCOV tracefile exists.

use std::path::Path;

use cireport_types::{CoverageSummary, FileCoverage};

use crate::{CoverageError, read_lossy};

/// Count `(covered, executable)` lines in one annotated source.
///
/// Each line is `count:lineno:source`. A `-` count marks a non-executable
/// line; a number (optionally followed by `*`) marks an executed line;
/// anything else (`#####`, `=====`) is executable but never run.
pub fn parse_gcov_text(text: &str) -> (u64, u64) {
    let mut covered = 0;
    let mut total = 0;

    for line in text.lines() {
        if line.trim().is_empty() || line.starts_with("//") {
            continue;
        }
        let mut parts = line.splitn(3, ':');
        let (Some(count), Some(_)) = (parts.next(), parts.next()) else {
            continue;
        };
        let count = count.trim();
        if count == "-" {
            continue;
        }
        total += 1;
        let digits = count.trim_end_matches('*');
        if !digits.is_empty()
            && digits.bytes().all(|b| b.is_ascii_digit())
            && digits.parse::<u64>().is_ok_and(|n| n > 0)
        {
            covered += 1;
        }
    }

    (covered, total)
}

/// Summarize every `*.gcov` file under `dir`.
///
/// Files without executable lines are left out; unreadable files are
/// skipped with a warning.
pub fn parse_gcov_dir(dir: &Path) -> Result<CoverageSummary, CoverageError> {
    let files = cireport_walk::find_files(dir, &["**/*.gcov"])
        .map_err(|e| CoverageError::Discovery(format!("{e:#}")))?;

    let mut summary = CoverageSummary::default();
    for path in files {
        let text = match read_lossy(&path) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable gcov file");
                continue;
            }
        };
        let (covered, total) = parse_gcov_text(&text);
        if total == 0 {
            continue;
        }
        let mut file = FileCoverage::new(path.display().to_string());
        file.lines_covered = covered;
        file.lines_total = total;
        file.finalize();
        summary.add_file(file);
    }

    summary.finalize();
    Ok(summary)
}
