//! LCOV tracefile parsing.

use std::path::Path;

use cireport_settings::CoverageFilter;
use cireport_types::{CoverageSummary, FileCoverage};

use crate::read_lossy;

fn number(tag: &str, raw: &str, line_no: usize) -> Option<u64> {
    match raw.trim().parse::<u64>() {
        Ok(n) => Some(n),
        Err(_) => {
            tracing::warn!(tag, value = raw, line = line_no, "skipping malformed LCOV count");
            None
        }
    }
}

/// Parse LCOV text into a summary, keeping only records `filter` accepts.
///
/// `FNF`/`FNH`/`LF`/`LH` overwrite, `BRF`/`BRH` accumulate. Tags outside an
/// `SF:` record are ignored.
pub fn parse_lcov(text: &str, filter: &CoverageFilter) -> CoverageSummary {
    let mut summary = CoverageSummary::default();
    let mut current: Option<FileCoverage> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        let line_no = idx + 1;

        if let Some(path) = line.strip_prefix("SF:") {
            current = Some(FileCoverage::new(path));
            continue;
        }
        if line == "end_of_record" {
            if let Some(mut file) = current.take()
                && filter.keeps(&file.path)
            {
                file.finalize();
                summary.add_file(file);
            }
            continue;
        }

        let Some(file) = current.as_mut() else {
            continue;
        };
        let Some((tag, value)) = line.split_once(':') else {
            continue;
        };
        match tag {
            "FNF" => {
                if let Some(n) = number(tag, value, line_no) {
                    file.functions_total = n;
                }
            }
            "FNH" => {
                if let Some(n) = number(tag, value, line_no) {
                    file.functions_covered = n;
                }
            }
            "LF" => {
                if let Some(n) = number(tag, value, line_no) {
                    file.lines_total = n;
                }
            }
            "LH" => {
                if let Some(n) = number(tag, value, line_no) {
                    file.lines_covered = n;
                }
            }
            "BRF" => {
                if let Some(n) = number(tag, value, line_no) {
                    let total = file.branches_total.get_or_insert(0);
                    *total = total.saturating_add(n);
                    file.branches_covered.get_or_insert(0);
                }
            }
            "BRH" => {
                if let Some(n) = number(tag, value, line_no) {
                    let covered = file.branches_covered.get_or_insert(0);
                    *covered = covered.saturating_add(n);
                    file.branches_total.get_or_insert(0);
                }
            }
            _ => {}
        }
    }

    summary.finalize();
    summary
}

/// Parse an LCOV file. A missing or unreadable file gives an empty summary.
pub fn parse_lcov_file(path: &Path, filter: &CoverageFilter) -> CoverageSummary {
    if !path.exists() {
        tracing::warn!(file = %path.display(), "LCOV file not found");
        return CoverageSummary::default();
    }
    match read_lossy(path) {
        Ok(text) => parse_lcov(&text, filter),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read LCOV file");
            CoverageSummary::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACE: &str = "\
TN:
SF:/repo/server/net.cpp
FN:3,connect
FNF:4
FNH:3
DA:3,1
LF:10
LH:8
BRF:4
BRH:2
BRF:2
BRH:1
end_of_record
SF:/usr/include/c++/13/vector
LF:100
LH:1
end_of_record
SF:/repo/client/ui.cpp
FNF:2
FNH:0
LF:10
LH:2
end_of_record
";

    #[test]
    fn aggregates_kept_records() {
        let summary = parse_lcov(TRACE, &CoverageFilter::default());
        assert_eq!(summary.files.len(), 2);
        assert_eq!(summary.lines_covered, 10);
        assert_eq!(summary.lines_total, 20);
        assert_eq!(summary.functions_covered, 3);
        assert_eq!(summary.functions_total, 6);
        assert_eq!(summary.line_coverage, 50.0);
        assert_eq!(summary.function_coverage, 50.0);
    }

    #[test]
    fn branch_tags_accumulate_per_record() {
        let summary = parse_lcov(TRACE, &CoverageFilter::default());
        let net = &summary.files[0];
        assert_eq!(net.branches_total, Some(6));
        assert_eq!(net.branches_covered, Some(3));
        assert_eq!(summary.files[1].branches_total, None);
        assert_eq!(summary.branch_coverage, 50.0);
    }

    #[test]
    fn include_list_restricts_records() {
        let filter = CoverageFilter::default().with_include_dirs(["server"]);
        let summary = parse_lcov(TRACE, &filter);
        assert_eq!(summary.files.len(), 1);
        assert_eq!(summary.files[0].path, "/repo/server/net.cpp");
        assert_eq!(summary.files[0].line_coverage, 80.0);
    }

    #[test]
    fn malformed_numbers_are_skipped() {
        let text = "SF:/repo/server/a.cpp\nLF:ten\nLH:3\nLF:5\nend_of_record\n";
        let summary = parse_lcov(text, &CoverageFilter::default());
        assert_eq!(summary.lines_total, 5);
        assert_eq!(summary.lines_covered, 3);
    }

    #[test]
    fn huge_branch_counts_saturate() {
        let text = "SF:/repo/server/a.cpp\nBRF:18446744073709551615\nBRF:7\n\
                    BRH:18446744073709551615\nBRH:1\nend_of_record\n\
                    SF:/repo/server/b.cpp\nLF:18446744073709551615\nBRF:2\nBRH:2\nend_of_record\n\
                    SF:/repo/server/c.cpp\nLF:5\nend_of_record\n";
        let summary = parse_lcov(text, &CoverageFilter::default());
        assert_eq!(summary.files[0].branches_total, Some(u64::MAX));
        assert_eq!(summary.branches_total, u64::MAX);
        assert_eq!(summary.lines_total, u64::MAX);
    }

    #[test]
    fn unterminated_record_is_dropped() {
        let summary = parse_lcov("SF:/repo/server/a.cpp\nLF:5\nLH:5\n", &CoverageFilter::default());
        assert!(summary.files.is_empty());
        assert_eq!(summary.line_coverage, 0.0);
    }

    #[test]
    fn missing_file_is_empty() {
        let summary = parse_lcov_file(Path::new("/no/such/coverage.info"), &CoverageFilter::default());
        assert_eq!(summary, CoverageSummary::default());
    }
}
