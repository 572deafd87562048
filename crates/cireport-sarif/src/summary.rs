//! The tab-separated `codeql-summary.txt` file.

use std::fs;
use std::io::Write;
use std::path::Path;

use cireport_types::{Finding, SummaryRow};

use crate::SarifError;

pub const SUMMARY_HEADER: &str = "severity\trule\tlocation\tmessage";

/// Write the header and one row per finding, creating parent directories.
pub fn write_summary(path: &Path, findings: &[Finding]) -> Result<(), SarifError> {
    let write_err = |source| SarifError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    let mut out = String::with_capacity(64 * (findings.len() + 1));
    out.push_str(SUMMARY_HEADER);
    out.push('\n');
    for finding in findings {
        out.push_str(&finding.to_tsv());
        out.push('\n');
    }
    let mut file = fs::File::create(path).map_err(write_err)?;
    file.write_all(out.as_bytes()).map_err(write_err)?;
    Ok(())
}

/// Parse summary text: the first line is the header, blank lines are skipped.
pub fn parse_summary(text: &str) -> Vec<SummaryRow> {
    text.lines()
        .skip(1)
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.trim().is_empty())
        .map(SummaryRow::from_tsv)
        .collect()
}

/// Read the summary file, `None` when it does not exist.
pub fn read_summary(path: &Path) -> Result<Option<Vec<SummaryRow>>, SarifError> {
    if !path.exists() {
        return Ok(None);
    }
    let text = fs::read_to_string(path).map_err(|source| SarifError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(parse_summary(&text)))
}
