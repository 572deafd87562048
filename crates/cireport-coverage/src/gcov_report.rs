//! Per-file coverage from `gcov` stdout, for the gcov console report.

use std::collections::BTreeMap;
use std::path::Path;
use std::process::Command;

use cireport_settings::GcovReportSettings;
use cireport_types::percent;

use crate::CoverageError;

/// Coverage of one source file as `gcov` reports it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GcovFileStat {
    pub percent: f64,
    pub covered: u64,
    pub total: u64,
}

impl GcovFileStat {
    pub fn uncovered(&self) -> u64 {
        self.total.saturating_sub(self.covered)
    }
}

/// A file worth improving first, ranked by `impact`.
#[derive(Debug, Clone, PartialEq)]
pub struct Priority {
    pub name: String,
    pub percent: f64,
    pub total: u64,
    pub uncovered: u64,
    /// `uncovered * (target - percent) / 100`
    pub impact: f64,
    /// Additional covered lines needed to reach the target.
    pub gain: i64,
}

/// Per-file stats keyed by file basename, plus running line totals.
///
/// Totals count every recorded entry, including entries whose basename was
/// already present and was replaced in `files`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GcovReport {
    files: BTreeMap<String, GcovFileStat>,
    covered_lines: u64,
    total_lines: u64,
}

impl GcovReport {
    /// Add one `gcov` record. A later record for the same basename replaces
    /// the per-file entry but still adds to the totals.
    pub fn record(&mut self, name: impl Into<String>, stat: GcovFileStat) {
        self.covered_lines = self.covered_lines.saturating_add(stat.covered);
        self.total_lines = self.total_lines.saturating_add(stat.total);
        self.files.insert(name.into(), stat);
    }

    /// Merge in another report.
    pub fn extend(&mut self, other: GcovReport) {
        self.covered_lines = self.covered_lines.saturating_add(other.covered_lines);
        self.total_lines = self.total_lines.saturating_add(other.total_lines);
        self.files.extend(other.files);
    }

    pub fn files(&self) -> &BTreeMap<String, GcovFileStat> {
        &self.files
    }

    pub fn covered(&self) -> u64 {
        self.covered_lines
    }

    pub fn total(&self) -> u64 {
        self.total_lines
    }

    pub fn overall(&self) -> f64 {
        percent(self.covered(), self.total())
    }

    /// Files ordered by coverage, highest first.
    pub fn by_percent(&self) -> Vec<(&str, &GcovFileStat)> {
        let mut rows: Vec<(&str, &GcovFileStat)> =
            self.files.iter().map(|(k, v)| (k.as_str(), v)).collect();
        rows.sort_by(|a, b| b.1.percent.total_cmp(&a.1.percent).then_with(|| a.0.cmp(b.0)));
        rows
    }

    /// Lines still needed to reach `target` overall.
    pub fn lines_needed(&self, target: f64) -> i64 {
        (target / 100.0 * self.total() as f64 - self.covered() as f64) as i64
    }

    /// Files under `target`, largest impact first.
    pub fn priorities(&self, target: f64) -> Vec<Priority> {
        let mut out: Vec<Priority> = self
            .files
            .iter()
            .filter(|(_, f)| f.percent < target)
            .map(|(name, f)| {
                let uncovered = f.uncovered();
                let target_covered = (f.total as f64 * target / 100.0) as i64;
                Priority {
                    name: name.clone(),
                    percent: f.percent,
                    total: f.total,
                    uncovered,
                    impact: uncovered as f64 * (target - f.percent) / 100.0,
                    gain: target_covered - f.covered as i64,
                }
            })
            .collect();
        out.sort_by(|a, b| b.impact.total_cmp(&a.impact).then_with(|| a.name.cmp(&b.name)));
        out
    }
}

/// Parse `gcov` stdout.
///
/// A `File '<path>'` line for a tracked source opens an entry; the next
/// `Lines executed:XX.XX% of N` line closes it.
pub fn parse_gcov_stdout(stdout: &str, settings: &GcovReportSettings) -> GcovReport {
    let mut report = GcovReport::default();
    let mut current: Option<String> = None;

    for line in stdout.lines() {
        let line = line.trim_end();
        if let Some(rest) = line.strip_prefix("File '") {
            let path = rest.strip_suffix('\'').unwrap_or(rest);
            current = settings.tracks(path).then(|| {
                Path::new(path)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.to_string())
            });
            continue;
        }
        let Some(rest) = line.strip_prefix("Lines executed:") else {
            continue;
        };
        let Some(name) = current.take() else {
            continue;
        };
        let Some((pct, total)) = rest.split_once("% of ") else {
            tracing::warn!(line, "unrecognized gcov summary line");
            continue;
        };
        let (Ok(pct), Ok(total)) = (pct.trim().parse::<f64>(), total.trim().parse::<u64>()) else {
            tracing::warn!(line, "unrecognized gcov summary line");
            continue;
        };
        let covered = (total as f64 * pct / 100.0) as u64;
        report.record(
            name,
            GcovFileStat {
                percent: pct,
                covered,
                total,
            },
        );
    }

    report
}

/// Run `gcov` for every `*.gcda` under the objects directory.
///
/// `gcov` runs from `build_dir` so its `.gcov` side files land there.
/// A failing invocation for one file is logged and skipped.
pub fn run_gcov(settings: &GcovReportSettings) -> Result<GcovReport, CoverageError> {
    let objects = settings.objects_path();
    let gcda_files = cireport_walk::find_files(&objects, &["**/*.gcda"])
        .map_err(|e| CoverageError::Discovery(format!("{e:#}")))?;
    tracing::info!(dir = %objects.display(), count = gcda_files.len(), "found gcda files");

    let build_dir = std::path::absolute(&settings.build_dir).map_err(CoverageError::Gcov)?;
    let mut report = GcovReport::default();
    for gcda in gcda_files {
        let object_dir = gcda.parent().unwrap_or(&objects);
        let object_dir = std::path::absolute(object_dir).map_err(CoverageError::Gcov)?;
        let gcda = std::path::absolute(&gcda).map_err(CoverageError::Gcov)?;
        tracing::debug!(file = %gcda.display(), "running gcov");

        let output = Command::new("gcov")
            .arg("-o")
            .arg(&object_dir)
            .arg(&gcda)
            .current_dir(&build_dir)
            .output()
            .map_err(CoverageError::Gcov)?;
        if !output.status.success() {
            tracing::warn!(file = %gcda.display(), status = %output.status, "gcov failed");
            continue;
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        report.extend(parse_gcov_stdout(&stdout, settings));
    }

    Ok(report)
}
