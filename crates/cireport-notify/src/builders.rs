//! Embed builders for each notification kind.

use cireport_settings::Thresholds;
use cireport_types::{
    CoverageStatus, CoverageSummary, GithubContext, Severity, SeverityCounts, SummaryRow,
    TestStatus, TestSummary,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::NotifyError;
use crate::embed::{Embed, EmbedField, EmbedFooter, clamp_field_value, colors};

const MAX_FAILED_LISTED: usize = 5;
const MAX_TOP_FINDINGS: usize = 5;
const MAX_MESSAGE_CHARS: usize = 60;
const MAX_LOCATION_CHARS: usize = 40;
const NO_DETAILS: &str = "No details available";

/// Input of `notify combined`: one document with both summaries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombinedData {
    pub tests: TestSummary,
    pub coverage: CoverageSummary,
}

/// Run metadata shared by every embed.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbedContext {
    pub github: GithubContext,
    pub server_url: String,
    pub timestamp: String,
}

impl EmbedContext {
    /// Context stamped with the current UTC time.
    pub fn now(github: GithubContext, server_url: impl Into<String>) -> Result<Self, NotifyError> {
        let timestamp = OffsetDateTime::now_utc().format(&Rfc3339)?;
        Ok(Self {
            github,
            server_url: server_url.into(),
            timestamp,
        })
    }

    pub fn workflow_url(&self) -> Option<String> {
        self.github.workflow_url(&self.server_url)
    }

    fn base(&self, title: String, status_text: &str, color: u32) -> Embed {
        Embed {
            title,
            description: format!("**{status_text}** for `{}`", self.github.repository()),
            color,
            timestamp: self.timestamp.clone(),
            fields: Vec::new(),
            footer: EmbedFooter {
                text: self.github.footer(),
            },
            url: self.workflow_url(),
        }
    }
}

pub fn tests_embed(ctx: &EmbedContext, t: &TestSummary) -> Embed {
    let (color, emoji, status_text) = match t.status() {
        TestStatus::Failed => (colors::RED, "❌", "Tests Failed"),
        TestStatus::Passed => (colors::GREEN, "✅", "All Tests Passed"),
        TestStatus::Completed => (colors::YELLOW, "⚠️", "Tests Completed"),
    };
    let mut embed = ctx.base(format!("{emoji} Unit Tests"), status_text, color);

    let mut lines = vec![
        format!("✅ Passed: **{}**", t.passed),
        format!("❌ Failed: **{}**", t.failed),
    ];
    if t.skipped > 0 {
        lines.push(format!("⏭️ Skipped: **{}**", t.skipped));
    }
    lines.push(format!("\n📊 **Total:** {}", t.total));
    lines.push(format!("⏱️ **Duration:** {:.2}s", t.duration));
    embed
        .fields
        .push(EmbedField::new("📊 Test Summary", lines.join("\n")));

    if t.failed > 0 {
        let mut lines: Vec<String> = t
            .failed_tests
            .iter()
            .take(MAX_FAILED_LISTED)
            .map(|name| format!("❌ `{name}`"))
            .collect();
        if t.failed_tests.len() > MAX_FAILED_LISTED {
            lines.push(format!(
                "\n...and {} more",
                t.failed_tests.len() - MAX_FAILED_LISTED
            ));
        }
        let value = if lines.is_empty() {
            NO_DETAILS.to_string()
        } else {
            clamp_field_value(lines.join("\n"))
        };
        embed.fields.push(EmbedField::new("❌ Failed Tests", value));
    }

    embed
}

fn ten_cell_bar(pct: f64) -> String {
    let filled = if pct > 0.0 {
        ((pct / 10.0) as usize).min(10)
    } else {
        0
    };
    format!("[{}{}] {pct:.1}%", "█".repeat(filled), "░".repeat(10 - filled))
}

pub fn coverage_embed(ctx: &EmbedContext, c: &CoverageSummary, thresholds: &Thresholds) -> Embed {
    let (color, emoji, status_text) = match thresholds.classify(c.line_coverage) {
        CoverageStatus::Good => (colors::GREEN, "✅", "Good Coverage"),
        CoverageStatus::Moderate => (colors::YELLOW, "⚠️", "Moderate Coverage"),
        CoverageStatus::Low => (colors::RED, "❌", "Low Coverage"),
    };
    let mut embed = ctx.base(format!("{emoji} Code Coverage"), status_text, color);

    let lines = [
        format!("📈 **Line Coverage:** {:.1}%", c.line_coverage),
        format!("   └ {}/{} lines covered", c.lines_covered, c.lines_total),
        format!("🔧 **Function Coverage:** {:.1}%", c.function_coverage),
        format!(
            "   └ {}/{} functions covered",
            c.functions_covered, c.functions_total
        ),
    ];
    embed
        .fields
        .push(EmbedField::new("📊 Coverage Summary", lines.join("\n")));
    embed.fields.push(EmbedField::new(
        "📊 Line Coverage",
        format!("`{}`", ten_cell_bar(c.line_coverage)),
    ));

    embed
}

pub fn combined_embed(
    ctx: &EmbedContext,
    t: &TestSummary,
    c: &CoverageSummary,
    thresholds: &Thresholds,
) -> Embed {
    let (color, emoji, status_text) = if t.failed > 0 || c.line_coverage < thresholds.moderate {
        (colors::RED, "❌", "Issues Detected")
    } else if c.line_coverage >= thresholds.good && t.all_passed() {
        (colors::GREEN, "✅", "All Good")
    } else {
        (colors::YELLOW, "⚠️", "Needs Improvement")
    };
    let mut embed = ctx.base(format!("{emoji} Tests & Coverage"), status_text, color);

    let test_lines = [
        format!("✅ Passed: **{}**", t.passed),
        format!("❌ Failed: **{}**", t.failed),
        format!("📊 Total: **{}**", t.total),
        format!("⏱️ Duration: **{:.2}s**", t.duration),
    ];
    embed
        .fields
        .push(EmbedField::new("🧪 Test Results", test_lines.join("\n")).inline());

    let coverage_lines = [
        format!("📈 Line: **{:.1}%**", c.line_coverage),
        format!("🔧 Function: **{:.1}%**", c.function_coverage),
        format!("📄 Lines: **{}/{}**", c.lines_covered, c.lines_total),
    ];
    embed
        .fields
        .push(EmbedField::new("📊 Coverage", coverage_lines.join("\n")).inline());

    embed
}

fn codeql_summary_field(counts: &SeverityCounts, total: usize) -> EmbedField {
    if counts.is_empty() {
        return EmbedField::new("📊 Summary", "✅ No findings detected");
    }

    let labels = [
        (Severity::Error, "Errors"),
        (Severity::Warning, "Warnings"),
        (Severity::Note, "Notes"),
        (Severity::Information, "Info"),
    ];
    let mut lines: Vec<String> = labels
        .iter()
        .filter(|(sev, _)| counts.level(*sev) > 0)
        .map(|(sev, label)| format!("{} {label}: **{}**", sev.emoji(), counts.level(*sev)))
        .collect();
    lines.push(format!("\n📈 **Total:** {total}"));

    EmbedField::new("📊 Analysis Summary", lines.join("\n"))
}

fn truncate_message(message: &str) -> String {
    if message.chars().count() > MAX_MESSAGE_CHARS {
        let head: String = message.chars().take(MAX_MESSAGE_CHARS).collect();
        format!("{head}...")
    } else {
        message.to_string()
    }
}

fn display_location(location: &str) -> String {
    let name = location.rsplit('/').next().unwrap_or(location);
    let len = name.chars().count();
    if len > MAX_LOCATION_CHARS {
        let tail: String = name.chars().skip(len - (MAX_LOCATION_CHARS - 3)).collect();
        format!("...{tail}")
    } else {
        name.to_string()
    }
}

fn top_findings_field(rows: &[SummaryRow]) -> EmbedField {
    let mut lines = Vec::new();
    for row in rows.iter().take(MAX_TOP_FINDINGS) {
        lines.push(format!("{} `{}`", Severity::emoji_for(&row.severity), row.rule));
        lines.push(format!("└ {}", display_location(&row.location)));
        let message = truncate_message(&row.message);
        if !message.is_empty() {
            lines.push(format!("   _{message}_"));
        }
        lines.push(String::new());
    }
    let value = clamp_field_value(lines.join("\n"));
    let value = if value.is_empty() {
        NO_DETAILS.to_string()
    } else {
        value
    };
    EmbedField::new("🔍 Top Findings", value)
}

/// CodeQL embed built from the TSV summary rows.
pub fn codeql_embed(ctx: &EmbedContext, rows: &[SummaryRow]) -> Embed {
    let counts = SeverityCounts::from_rows(rows);

    let (color, emoji) = if counts.level(Severity::Error) > 0 {
        (colors::RED, "🔴")
    } else if counts.level(Severity::Warning) > 0 {
        (colors::YELLOW, "🟡")
    } else if counts.level(Severity::Note) > 0 {
        (colors::BLURPLE, "🔵")
    } else {
        (colors::GREEN, "✅")
    };
    let status_text = if counts.level(Severity::Error) > 0 {
        "Issues Found"
    } else if counts.level(Severity::Warning) > 0 {
        "Warnings Detected"
    } else {
        "Analysis Complete"
    };

    let mut embed = ctx.base(format!("{emoji} CodeQL Static Analysis"), status_text, color);
    embed.fields.push(codeql_summary_field(&counts, rows.len()));
    if !rows.is_empty() {
        embed.fields.push(top_findings_field(rows));
    }
    if let Some(url) = ctx.workflow_url() {
        embed
            .fields
            .push(EmbedField::new("🔗 Actions", format!("[View Full Report]({url})")));
    }

    embed
}
