//! # cireport-gate
//!
//! **Tier 3 (Policy)**
//!
//! Decides whether a set of findings should fail the CI job.
//!
//! ## What belongs here
//! * Fail-on severity policy and its evaluation
//! * Parsing `--fail-on` lists
//!
//! ## What does NOT belong here
//! * Reading the TSV summary (use cireport-sarif)
//! * Printing (the binary does that)

use std::str::FromStr;

use cireport_types::{Severity, SeverityCounts};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from building a gate policy.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("Unknown severity in fail-on list: {0}")]
    UnknownSeverity(String),
}

/// Severities that fail the job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingsGate {
    pub fail_on: Vec<Severity>,
}

impl Default for FindingsGate {
    fn default() -> Self {
        Self {
            fail_on: vec![Severity::Error, Severity::Warning],
        }
    }
}

impl FromStr for FindingsGate {
    type Err = GateError;

    /// Parse a comma-separated list such as `error,warning`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fail_on = Vec::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let sev = part
                .parse::<Severity>()
                .map_err(|_| GateError::UnknownSeverity(part.to_string()))?;
            if !fail_on.contains(&sev) {
                fail_on.push(sev);
            }
        }
        Ok(Self { fail_on })
    }
}

impl FindingsGate {
    pub fn new(fail_on: Vec<Severity>) -> Self {
        Self { fail_on }
    }

    pub fn evaluate(&self, counts: &SeverityCounts) -> GateResult {
        GateResult::from_counts(counts, &self.fail_on)
    }

    /// `error, warning`
    pub fn describe(&self) -> String {
        self.fail_on
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Outcome of evaluating a [`FindingsGate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateResult {
    /// `true` when no failing finding was seen.
    pub passed: bool,
    /// Findings at a failing severity.
    pub failing: usize,
    pub errors: usize,
    pub warnings: usize,
    pub total: usize,
}

impl GateResult {
    pub fn from_counts(counts: &SeverityCounts, fail_on: &[Severity]) -> Self {
        let failing = fail_on.iter().map(|s| counts.level(*s)).sum();
        Self {
            passed: failing == 0,
            failing,
            errors: counts.level(Severity::Error),
            warnings: counts.level(Severity::Warning),
            total: counts.total(),
        }
    }
}
