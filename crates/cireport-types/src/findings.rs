//! Static-analysis findings and severity levels.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Normalized finding severity.
///
/// The derived `Ord` follows report order: errors first, information last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Note,
    Information,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Error,
        Severity::Warning,
        Severity::Note,
        Severity::Information,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Note => "note",
            Severity::Information => "information",
        }
    }

    /// Sort rank used when ordering findings.
    pub fn rank(self) -> u8 {
        match self {
            Severity::Error => 0,
            Severity::Warning => 1,
            Severity::Note => 2,
            Severity::Information => 3,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Severity::Error => "🔴",
            Severity::Warning => "🟡",
            Severity::Note => "🔵",
            Severity::Information => "ℹ️",
        }
    }

    /// `"Error"`, `"Warning"`, ...
    pub fn title(self) -> &'static str {
        match self {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
            Severity::Note => "Note",
            Severity::Information => "Information",
        }
    }

    /// Emoji for free-form severity text, `⚪` when it is not a known level.
    pub fn emoji_for(text: &str) -> &'static str {
        text.parse::<Severity>().map(Severity::emoji).unwrap_or("⚪")
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parse of one of the four level names (case-insensitive).
impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(Severity::Error),
            "warning" => Ok(Severity::Warning),
            "note" => Ok(Severity::Note),
            "information" => Ok(Severity::Information),
            other => Err(format!("unknown severity: {other}")),
        }
    }
}

/// A normalized static-analysis finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub rule: String,
    /// `path:line`, or `?` when the result had no location.
    pub location: String,
    /// First line of the result message.
    pub message: String,
}

impl Finding {
    /// Tab-separated summary row.
    pub fn to_tsv(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}",
            self.severity, self.rule, self.location, self.message
        )
    }
}

/// A finding read back from the TSV summary.
///
/// The severity column is kept verbatim so unknown levels survive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryRow {
    pub severity: String,
    pub rule: String,
    pub location: String,
    pub message: String,
}

impl SummaryRow {
    /// Split a line into at most four columns, padding missing ones.
    pub fn from_tsv(line: &str) -> Self {
        let mut parts = line.splitn(4, '\t').map(str::to_string);
        SummaryRow {
            severity: parts.next().unwrap_or_default(),
            rule: parts.next().unwrap_or_default(),
            location: parts.next().unwrap_or_default(),
            message: parts.next().unwrap_or_default(),
        }
    }

    pub fn severity_key(&self) -> String {
        self.severity.trim().to_lowercase()
    }
}

impl From<Finding> for SummaryRow {
    fn from(f: Finding) -> Self {
        SummaryRow {
            severity: f.severity.as_str().to_string(),
            rule: f.rule,
            location: f.location,
            message: f.message,
        }
    }
}

/// Finding counts keyed by lowercased severity text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeverityCounts(BTreeMap<String, usize>);

impl SeverityCounts {
    pub fn add(&mut self, severity: &str) {
        *self.0.entry(severity.trim().to_lowercase()).or_insert(0) += 1;
    }

    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a SummaryRow>,
    {
        let mut counts = SeverityCounts::default();
        for row in rows {
            counts.add(&row.severity);
        }
        counts
    }

    pub fn get(&self, severity: &str) -> usize {
        self.0.get(severity).copied().unwrap_or(0)
    }

    pub fn level(&self, severity: Severity) -> usize {
        self.get(severity.as_str())
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Severities outside the four known levels, with their counts.
    pub fn unknown(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0
            .iter()
            .filter(|(k, _)| k.parse::<Severity>().is_err())
            .map(|(k, v)| (k.as_str(), *v))
    }
}
