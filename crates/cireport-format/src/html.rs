//! HTML findings table for the step summary.

use cireport_types::{Severity, SeverityCounts, SummaryRow};

const CELL: &str = "border:1px solid #d0d7de;padding:8px;";

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn row_style(severity: &str) -> &'static str {
    match severity.to_lowercase().as_str() {
        "error" => "background:#ffeef0;",
        "warning" => "background:#fff8c5;",
        _ => "",
    }
}

/// Render the findings table (first `max_rows` rows) and per-severity
/// statistics over all rows.
pub fn findings_html(rows: &[SummaryRow], max_rows: usize) -> String {
    if rows.is_empty() {
        return "<p>✅ No findings to display</p>".to_string();
    }

    let shown = &rows[..rows.len().min(max_rows)];
    let mut parts: Vec<String> = Vec::with_capacity(shown.len() * 6 + 24);

    parts.push(format!(
        "<h2>🔍 CodeQL Scan Summary (Top {} of {})</h2>",
        shown.len(),
        rows.len()
    ));
    parts.push(
        r#"<div style="max-height:500px;overflow:auto;border:1px solid #e1e4e8;border-radius:6px;">"#
            .to_string(),
    );
    parts.push(r#"<table style="border-collapse:collapse;width:100%;font-size:13px;">"#.to_string());
    parts.push(r#"<thead><tr style="background:#f6f8fa;">"#.to_string());
    for heading in ["Severity", "Rule", "Location", "Message"] {
        parts.push(format!(
            r#"<th style="{CELL}text-align:left;font-weight:600;">{heading}</th>"#
        ));
    }
    parts.push("</tr></thead>".to_string());
    parts.push("<tbody>".to_string());

    for row in shown {
        let severity = if row.severity.is_empty() {
            "⚪ unknown".to_string()
        } else {
            format!(
                "{} {}",
                Severity::emoji_for(&row.severity),
                escape_html(&row.severity)
            )
        };
        parts.push(format!(r#"<tr style="{}">"#, row_style(&row.severity)));
        parts.push(format!(
            r#"<td style="{CELL}white-space:nowrap;">{severity}</td>"#
        ));
        parts.push(format!(
            r#"<td style="{CELL}font-family:monospace;font-size:12px;">{}</td>"#,
            escape_html(&row.rule)
        ));
        parts.push(format!(
            r#"<td style="{CELL}font-family:monospace;font-size:11px;">{}</td>"#,
            escape_html(&row.location)
        ));
        parts.push(format!(
            r#"<td style="{CELL}">{}</td>"#,
            escape_html(&row.message)
        ));
        parts.push("</tr>".to_string());
    }

    parts.push("</tbody>".to_string());
    parts.push("</table>".to_string());
    parts.push("</div>".to_string());

    let counts = SeverityCounts::from_rows(rows);
    parts.push("<h3>📊 Statistics</h3>".to_string());
    parts.push(r#"<ul style="list-style:none;padding-left:0;">"#.to_string());
    for sev in Severity::ALL {
        let count = counts.level(sev);
        if count > 0 {
            parts.push(format!(
                "<li>{} <strong>{}:</strong> {count}</li>",
                sev.emoji(),
                sev.title()
            ));
        }
    }
    parts.push(format!(
        "<li>📈 <strong>Total:</strong> {}</li>",
        rows.len()
    ));
    parts.push("</ul>".to_string());

    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(line: &str) -> SummaryRow {
        SummaryRow::from_tsv(line)
    }

    #[test]
    fn escapes_all_special_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn empty_findings() {
        assert_eq!(findings_html(&[], 100), "<p>✅ No findings to display</p>");
    }

    #[test]
    fn table_rows_and_stats() {
        let rows = vec![
            row("error\tcpp/a\tsrc/a.cpp:1\tBuffer <overflow>"),
            row("warning\tcpp/b\tsrc/b.cpp:2\tmaybe"),
            row("\tcpp/c\t?\t"),
        ];
        let html = findings_html(&rows, 2);
        assert!(html.starts_with("<h2>🔍 CodeQL Scan Summary (Top 2 of 3)</h2>\n"));
        assert!(html.contains(r#"<tr style="background:#ffeef0;">"#));
        assert!(html.contains(r#"<tr style="background:#fff8c5;">"#));
        assert!(html.contains("Buffer &lt;overflow&gt;"));
        assert!(!html.contains("cpp/c"));
        assert!(html.contains("<li>🔴 <strong>Error:</strong> 1</li>"));
        assert!(html.contains("<li>📈 <strong>Total:</strong> 3</li>"));
        assert!(html.ends_with("</ul>"));
    }

    #[test]
    fn blank_severity_shows_unknown() {
        let html = findings_html(&[row("\tcpp/c\t?\tmsg")], 10);
        assert!(html.contains("⚪ unknown</td>"));
        assert!(html.contains(r#"<tr style="">"#));
    }
}
