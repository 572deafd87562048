//! # cireport-settings
//!
//! **Tier 0 (Pure Settings)**
//!
//! Clap-free settings for the cireport jobs. Each struct carries the
//! built-in defaults; the binary overlays `cireport.toml` and CLI flags on
//! top of them.
//!
//! ## What belongs here
//! * Pure data types with Serde derive
//! * Thresholds, coverage filters, CodeQL, notification and gcov settings
//! * Default values
//!
//! ## What does NOT belong here
//! * Clap parsing (use cireport-config)
//! * I/O operations
//! * Report parsing or rendering

use std::path::{Path, PathBuf};

use cireport_types::{CoverageStatus, Severity};
use serde::{Deserialize, Serialize};

/// Coverage health thresholds, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// At or above this value coverage is "good".
    pub good: f64,
    /// At or above this value (and below `good`) coverage is "moderate".
    pub moderate: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            good: 80.0,
            moderate: 60.0,
        }
    }
}

impl Thresholds {
    pub fn classify(&self, pct: f64) -> CoverageStatus {
        CoverageStatus::classify(pct, self.good, self.moderate)
    }
}

/// LCOV record filtering.
///
/// A record is kept when its path contains any `include` pattern (an
/// explicitly empty list keeps everything) and no `exclude` pattern.
/// By default only `client/` and `server/` sources are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageFilter {
    #[serde(default = "default_coverage_include")]
    pub include: Vec<String>,
    #[serde(default = "default_coverage_exclude")]
    pub exclude: Vec<String>,
}

fn default_coverage_include() -> Vec<String> {
    vec!["client/".to_string(), "server/".to_string()]
}

fn default_coverage_exclude() -> Vec<String> {
    vec!["vcpkg_installed".to_string(), "/usr/".to_string()]
}

impl Default for CoverageFilter {
    fn default() -> Self {
        Self {
            include: default_coverage_include(),
            exclude: default_coverage_exclude(),
        }
    }
}

impl CoverageFilter {
    /// Build include patterns from bare directory names: `client` becomes `client/`.
    pub fn with_include_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.include = dirs
            .into_iter()
            .map(|d| d.as_ref().trim().to_string())
            .filter(|d| !d.is_empty())
            .map(|d| if d.ends_with('/') { d } else { format!("{d}/") })
            .collect();
        self
    }

    pub fn keeps(&self, path: &str) -> bool {
        let included =
            self.include.is_empty() || self.include.iter().any(|p| path.contains(p.as_str()));
        included && !self.exclude.iter().any(|p| path.contains(p.as_str()))
    }
}

/// Name of the TSV findings summary inside the CodeQL directory.
pub const CODEQL_SUMMARY_FILE: &str = "codeql-summary.txt";

/// CodeQL summarize/check/publish settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeqlSettings {
    /// Directory holding `*.sarif` files and the TSV summary.
    pub dir: PathBuf,
    /// Findings whose location contains any of these are dropped.
    pub skip_patterns: Vec<String>,
    /// Severities that fail `codeql check`.
    pub fail_on: Vec<Severity>,
    /// Rows rendered in the HTML table.
    pub max_table_rows: usize,
    /// Workflow annotations emitted by `codeql publish`.
    pub max_annotations: usize,
}

impl Default for CodeqlSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("artifacts/codeql"),
            skip_patterns: vec![
                "vcpkg_installed".to_string(),
                "/vcpkg_installed/".to_string(),
                "/vcpkg/".to_string(),
            ],
            fail_on: vec![Severity::Error, Severity::Warning],
            max_table_rows: 100,
            max_annotations: 10,
        }
    }
}

impl CodeqlSettings {
    pub fn summary_path(&self) -> PathBuf {
        self.dir.join(CODEQL_SUMMARY_FILE)
    }

    pub fn should_skip(&self, location: &str) -> bool {
        self.skip_patterns
            .iter()
            .any(|p| location.contains(p.as_str()))
    }
}

pub const DEFAULT_AVATAR_URL: &str =
    "https://github.githubassets.com/images/modules/logos_page/GitHub-Mark.png";

/// Webhook notification settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifySettings {
    /// Bot name for test/coverage notifications.
    pub username: String,
    /// Bot name for CodeQL notifications.
    pub codeql_username: String,
    pub avatar_url: String,
    pub timeout_secs: u64,
    /// Base URL used to link back to the workflow run.
    pub server_url: String,
}

impl Default for NotifySettings {
    fn default() -> Self {
        Self {
            username: "CI/CD Bot".to_string(),
            codeql_username: "CodeQL Bot".to_string(),
            avatar_url: DEFAULT_AVATAR_URL.to_string(),
            timeout_secs: 10,
            server_url: cireport_types::context::DEFAULT_SERVER_URL.to_string(),
        }
    }
}

/// Server-side gcov report settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GcovReportSettings {
    /// Directory `gcov` is run from.
    pub build_dir: PathBuf,
    /// Directory searched for `*.gcda`, relative to `build_dir`.
    pub objects_dir: PathBuf,
    /// Only source paths containing this are tracked.
    pub source_filter: String,
    /// Tracked source extensions.
    pub extensions: Vec<String>,
    /// Target line coverage, in percent.
    pub target: f64,
}

impl Default for GcovReportSettings {
    fn default() -> Self {
        Self {
            build_dir: PathBuf::from("build"),
            objects_dir: PathBuf::from("objects"),
            source_filter: "/server/".to_string(),
            extensions: [".cpp", ".cc", ".cxx", ".c"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            target: 80.0,
        }
    }
}

impl GcovReportSettings {
    pub fn objects_path(&self) -> PathBuf {
        self.build_dir.join(&self.objects_dir)
    }

    /// Whether gcov output for `path` belongs in the report.
    pub fn tracks(&self, path: &str) -> bool {
        path.contains(self.source_filter.as_str())
            && self.extensions.iter().any(|ext| path.ends_with(ext.as_str()))
    }

    pub fn with_build_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.build_dir = dir.as_ref().to_path_buf();
        self
    }
}
