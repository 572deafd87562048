//! GitHub Actions workflow commands (`::error file=...::message`).

use std::fmt;

use cireport_types::SummaryRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationLevel {
    Error,
    Warning,
    Notice,
}

impl AnnotationLevel {
    pub fn for_severity(severity: &str) -> Self {
        match severity.to_lowercase().as_str() {
            "error" => AnnotationLevel::Error,
            "warning" => AnnotationLevel::Warning,
            _ => AnnotationLevel::Notice,
        }
    }

    pub fn command(self) -> &'static str {
        match self {
            AnnotationLevel::Error => "error",
            AnnotationLevel::Warning => "warning",
            AnnotationLevel::Notice => "notice",
        }
    }
}

/// One workflow annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub level: AnnotationLevel,
    pub file: Option<String>,
    pub line: Option<String>,
    pub message: String,
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "::{}", self.level.command())?;
        if let Some(file) = &self.file {
            write!(f, " file={}", escape_property(file))?;
            if let Some(line) = &self.line {
                write!(f, ",line={line}")?;
            }
        }
        write!(f, "::{}", escape_data(&self.message))
    }
}

impl Annotation {
    /// Build the annotation for a summary row.
    ///
    /// A `file:line` location annotates that line (a non-numeric line
    /// becomes `1`). A location without a colon gives a file-less
    /// annotation. Rows without a location only annotate errors and
    /// warnings.
    pub fn from_row(row: &SummaryRow) -> Option<Self> {
        let level = AnnotationLevel::for_severity(&row.severity);
        let clean = row.message.replace(['\n', '\r', '\t'], " ");
        let message = format!("{}: {clean}", row.rule);
        let location = row.location.as_str();

        if location.is_empty() || location == "?" {
            if level == AnnotationLevel::Notice {
                return None;
            }
            return Some(Annotation {
                level,
                file: None,
                line: None,
                message,
            });
        }

        let (file, line) = match location.rsplit_once(':') {
            Some((file, line)) => {
                let line = if !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit()) {
                    line
                } else {
                    "1"
                };
                (Some(file.to_string()), Some(line.to_string()))
            }
            None => (None, None),
        };
        Some(Annotation {
            level,
            file,
            line,
            message,
        })
    }
}

/// Annotations for the first `max` rows. Rows that produce no annotation
/// still use up their slot.
pub fn annotations(rows: &[SummaryRow], max: usize) -> Vec<Annotation> {
    rows.iter().take(max).filter_map(Annotation::from_row).collect()
}
