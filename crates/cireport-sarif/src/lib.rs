//! # cireport-sarif
//!
//! **Tier 2 (Report Parsing)**
//!
//! Normalizes SARIF results (as produced by CodeQL and friends) into
//! [`Finding`]s and round-trips them through the tab-separated
//! `codeql-summary.txt` that later CI steps consume.
//!
//! ## What belongs here
//! * Rule metadata indexing and the severity fallback chain
//! * Location and message extraction
//! * TSV summary writing and reading
//!
//! ## What does NOT belong here
//! * Pass/fail decisions (use cireport-gate)
//! * HTML or chat rendering (use cireport-format / cireport-notify)

pub mod rules;
pub mod severity;
pub mod summary;

use std::path::{Path, PathBuf};

use cireport_settings::CodeqlSettings;
use cireport_types::Finding;
use serde_json::Value;
use thiserror::Error;

pub use rules::RuleIndex;
pub use severity::{normalize_severity, normalize_severity_str, raw_severity};
pub use summary::{SUMMARY_HEADER, read_summary, write_summary};

/// Errors from reading SARIF files or the TSV summary.
#[derive(Debug, Error)]
pub enum SarifError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to search for SARIF files: {0}")]
    Discovery(String),
}

/// `uri:startLine` of the first physical location, or `?`.
pub fn extract_location(result: &Value) -> String {
    let Some(first) = result
        .get("locations")
        .and_then(Value::as_array)
        .and_then(|l| l.first())
    else {
        return "?".to_string();
    };
    let Some(phys) = first.get("physicalLocation").filter(|p| p.is_object()) else {
        return "?".to_string();
    };
    let uri = phys
        .get("artifactLocation")
        .and_then(|a| a.get("uri"))
        .and_then(Value::as_str)
        .unwrap_or("");
    let line = match phys.get("region").and_then(|r| r.get("startLine")) {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        _ => "?".to_string(),
    };
    format!("{uri}:{line}")
}

/// First line of the trimmed message text (or markdown).
pub fn extract_message(result: &Value) -> String {
    let msg = result.get("message");
    let text = severity::present(msg.and_then(|m| m.get("text")))
        .or_else(|| severity::present(msg.and_then(|m| m.get("markdown"))))
        .and_then(Value::as_str)
        .unwrap_or("");
    text.trim()
        .split(['\n', '\r'])
        .next()
        .unwrap_or("")
        .to_string()
}

fn extract_rule_id(result: &Value) -> String {
    result
        .get("ruleId")
        .and_then(Value::as_str)
        .or_else(|| {
            result
                .get("rule")
                .and_then(|r| r.get("id"))
                .and_then(Value::as_str)
        })
        .unwrap_or("N/A")
        .to_string()
}

/// Findings of every run in a SARIF document, in document order.
///
/// Results located in paths matching a skip pattern are dropped.
pub fn extract_findings(doc: &Value, settings: &CodeqlSettings) -> Vec<Finding> {
    let mut findings = Vec::new();
    let runs = doc.get("runs").and_then(Value::as_array);
    for run in runs.into_iter().flatten() {
        let rules = RuleIndex::build(run);
        let results = run.get("results").and_then(Value::as_array);
        for result in results.into_iter().flatten() {
            let location = extract_location(result);
            if settings.should_skip(&location) {
                tracing::debug!(location, "skipping third-party finding");
                continue;
            }
            findings.push(Finding {
                severity: normalize_severity(raw_severity(result, &rules)),
                rule: extract_rule_id(result),
                location,
                message: extract_message(result),
            });
        }
    }
    findings
}

/// Read and normalize one SARIF file.
pub fn parse_sarif_file(path: &Path, settings: &CodeqlSettings) -> Result<Vec<Finding>, SarifError> {
    let text = std::fs::read_to_string(path).map_err(|source| SarifError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let doc: Value = serde_json::from_str(&text).map_err(|source| SarifError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(extract_findings(&doc, settings))
}

/// Order findings by severity, then rule. Ties keep their input order.
pub fn sort_findings(findings: &mut [Finding]) {
    findings.sort_by(|a, b| {
        a.severity
            .rank()
            .cmp(&b.severity.rank())
            .then_with(|| a.rule.cmp(&b.rule))
    });
}

/// Findings gathered from a CodeQL output directory.
#[derive(Debug, Clone, Default)]
pub struct SarifScan {
    /// Each SARIF file with the number of findings it contributed.
    pub files: Vec<(PathBuf, usize)>,
    /// Sorted findings across all files.
    pub findings: Vec<Finding>,
}

/// Collect and sort findings from every `*.sarif` file in `settings.dir`.
///
/// Unreadable or invalid files are logged and contribute nothing.
pub fn scan_dir(settings: &CodeqlSettings) -> Result<SarifScan, SarifError> {
    let files = cireport_walk::find_files(&settings.dir, &["*.sarif"])
        .map_err(|e| SarifError::Discovery(format!("{e:#}")))?;

    let mut scan = SarifScan::default();
    for path in files {
        let found = match parse_sarif_file(&path, settings) {
            Ok(found) => found,
            Err(e) => {
                tracing::error!(error = %e, "skipping SARIF file");
                Vec::new()
            }
        };
        scan.files.push((path, found.len()));
        scan.findings.extend(found);
    }
    sort_findings(&mut scan.findings);
    Ok(scan)
}
