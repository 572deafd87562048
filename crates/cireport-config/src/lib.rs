//! # cireport-config
//!
//! **Tier 4 (Configuration)**
//!
//! This crate defines the CLI arguments and the `cireport.toml` file
//! structures.
//!
//! ## What belongs here
//! * Clap `Parser`, `Args`, `Subcommand` structs
//! * Configuration file struct definitions (Serde)
//! * CLI enums
//!
//! ## What does NOT belong here
//! * Business logic
//! * I/O operations (except config file parsing)
//! * Built-in defaults (use cireport-settings)

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// `cireport`: CI report glue for test results, coverage, CodeQL findings,
/// the GitHub step summary and Discord notifications.
#[derive(Parser, Debug)]
#[command(name = "cireport", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Verbose logging on stderr (repeat for more detail).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to a `cireport.toml` file.
    ///
    /// Defaults to `./cireport.toml`, then the user config directory.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Parse CTest and GoogleTest results into `test-results.json`.
    Tests(TestsArgs),

    /// Parse LCOV or gcov coverage into `coverage.json`.
    Coverage(CoverageArgs),

    /// Run gcov over the build objects and print a per-file report.
    GcovReport(GcovReportArgs),

    /// Render a Markdown step summary from JSON summaries.
    Summary(SummaryArgs),

    /// Send a Discord webhook notification.
    Notify(NotifyArgs),

    /// Summarize, gate and publish CodeQL SARIF findings.
    Codeql(CodeqlArgs),

    /// Render an SVG badge from a JSON summary.
    Badge(BadgeArgs),

    /// Generate shell completions.
    Completions(CompletionsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct TestsArgs {
    /// CMake build directory containing `Testing/`.
    #[arg(value_name = "BUILD_DIR")]
    pub build_dir: PathBuf,

    /// Output JSON path.
    #[arg(short, long, value_name = "PATH", default_value = "test-results.json")]
    pub output: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct CoverageArgs {
    /// An LCOV `.info` file or a build directory.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output JSON path.
    #[arg(short, long, value_name = "PATH", default_value = "coverage.json")]
    pub output: PathBuf,

    /// Only keep files under these directories (comma-separated).
    #[arg(long, value_delimiter = ',', value_name = "DIRS")]
    pub include: Vec<String>,

    /// Drop files whose path contains any of these (comma-separated).
    #[arg(long, value_delimiter = ',', value_name = "PATTERNS")]
    pub exclude: Vec<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GcovReportArgs {
    /// Directory gcov runs from [default: build].
    #[arg(long, value_name = "DIR")]
    pub build_dir: Option<PathBuf>,

    /// Object directory, relative to the build directory [default: objects].
    #[arg(long, value_name = "DIR")]
    pub objects: Option<PathBuf>,

    /// Only report sources whose path contains this [default: /server/].
    #[arg(long, value_name = "TEXT")]
    pub source_filter: Option<String>,

    /// Target line coverage in percent [default: 80].
    #[arg(long)]
    pub target: Option<f64>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryKind {
    Tests,
    Coverage,
    Combined,
}

#[derive(Args, Debug, Clone)]
pub struct SummaryArgs {
    #[arg(value_enum)]
    pub kind: SummaryKind,

    /// `test-results.json` and/or `coverage.json` (tests first for `combined`).
    #[arg(value_name = "JSON", required = true, num_args = 1..=2)]
    pub inputs: Vec<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotifyKind {
    Tests,
    Coverage,
    Combined,
    Codeql,
}

#[derive(Args, Debug, Clone)]
pub struct NotifyArgs {
    #[arg(value_enum)]
    pub kind: NotifyKind,

    /// JSON input; for `codeql`, the TSV summary [default: <codeql dir>/codeql-summary.txt].
    #[arg(value_name = "DATA")]
    pub data: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct CodeqlArgs {
    #[command(subcommand)]
    pub command: CodeqlCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CodeqlCommand {
    /// Collect findings from `*.sarif` files into the TSV summary.
    Summarize(SummarizeArgs),

    /// Fail when the summary has findings at a failing severity.
    Check(CheckArgs),

    /// Publish the findings table and workflow annotations.
    Publish(PublishArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct SummarizeArgs {
    /// Directory with `*.sarif` files [default: artifacts/codeql].
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    /// TSV summary path [default: <codeql dir>/codeql-summary.txt].
    #[arg(long, value_name = "PATH")]
    pub summary: Option<PathBuf>,

    /// Comma-separated severities that fail the job [default: error,warning].
    #[arg(long, value_name = "LEVELS")]
    pub fail_on: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PublishArgs {
    /// TSV summary path [default: <codeql dir>/codeql-summary.txt].
    #[arg(long, value_name = "PATH")]
    pub summary: Option<PathBuf>,

    /// Rows rendered in the HTML table [default: 100].
    #[arg(long)]
    pub max_rows: Option<usize>,

    /// Workflow annotations emitted [default: 10].
    #[arg(long)]
    pub max_annotations: Option<usize>,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BadgeMetric {
    #[default]
    Line,
    Function,
    Branch,
    Tests,
}

#[derive(Args, Debug, Clone)]
pub struct BadgeArgs {
    /// `coverage.json` (line/function/branch) or `test-results.json` (tests).
    #[arg(value_name = "JSON")]
    pub input: PathBuf,

    /// Metric to render.
    #[arg(long, value_enum, default_value_t = BadgeMetric::Line)]
    pub metric: BadgeMetric,

    /// Label for the left segment [default: metric name].
    #[arg(long)]
    pub label: Option<String>,

    /// Write the SVG here instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct CompletionsArgs {
    /// Shell to generate completions for.
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shell {
    Bash,
    Elvish,
    Fish,
    Powershell,
    Zsh,
}

// =============================================================================
// TOML Configuration File Structures
// =============================================================================

/// Root of `cireport.toml`. Every value is optional; unset values fall back
/// to the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub thresholds: ThresholdsConfig,
    pub coverage: CoverageConfig,
    pub codeql: CodeqlConfig,
    pub notify: NotifyConfig,
    pub gcov: GcovConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdsConfig {
    pub good: Option<f64>,
    pub moderate: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageConfig {
    /// Directories to keep (a trailing `/` is added).
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeqlConfig {
    pub dir: Option<PathBuf>,
    pub skip_patterns: Option<Vec<String>>,
    pub fail_on: Option<Vec<String>>,
    pub max_table_rows: Option<usize>,
    pub max_annotations: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    pub username: Option<String>,
    pub codeql_username: Option<String>,
    pub avatar_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GcovConfig {
    pub build_dir: Option<PathBuf>,
    pub objects_dir: Option<PathBuf>,
    pub source_filter: Option<String>,
    pub extensions: Option<Vec<String>>,
    pub target: Option<f64>,
}

impl TomlConfig {
    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> TomlResult<Self> {
        toml::from_str(s)
    }

    /// Load configuration from a file path.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

/// Result type alias for TOML parsing errors.
pub type TomlResult<T> = Result<T, toml::de::Error>;
