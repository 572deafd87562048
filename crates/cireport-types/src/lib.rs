//! # cireport-types
//!
//! **Tier 0 (Core Types)**
//!
//! This crate defines the data structures exchanged between `cireport`
//! steps. One CI step writes a JSON summary, the next one reads it back, so
//! the primary contract is the JSON shape rather than the Rust structs.
//!
//! ## Stability Policy
//!
//! **JSON-first stability**: every summary deserializes with missing keys
//! defaulting to zero/empty, so summaries written by older releases (or by
//! hand) stay readable.
//!
//! ## What belongs here
//! * Pure data structs (test, coverage, findings, GitHub context)
//! * Serialization/Deserialization logic
//! * Small derived values (percentages, status classification)
//!
//! ## What does NOT belong here
//! * File I/O or environment access
//! * CLI argument parsing
//! * Report parsing (use the `cireport-*` parser crates)

pub mod context;
pub mod coverage;
pub mod findings;
pub mod testrun;

pub use context::GithubContext;
pub use coverage::{CoverageStatus, CoverageSummary, FileCoverage, percent};
pub use findings::{Finding, Severity, SeverityCounts, SummaryRow};
pub use testrun::{TestStatus, TestSummary};

