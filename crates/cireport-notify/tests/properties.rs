//! Property-based tests for cireport-notify.

use cireport_notify::embed::MAX_FIELD_VALUE_CHARS;
use cireport_notify::{EmbedContext, codeql_embed, tests_embed};
use cireport_types::{GithubContext, SummaryRow, TestSummary};
use proptest::prelude::*;

fn ctx() -> EmbedContext {
    EmbedContext {
        github: GithubContext::default(),
        server_url: "https://github.com".into(),
        timestamp: "2026-01-01T00:00:00Z".into(),
    }
}

fn row_strategy() -> impl Strategy<Value = SummaryRow> {
    (
        prop::sample::select(vec!["error", "warning", "note", "information", "odd"]),
        "\\PC{0,200}",
        "\\PC{0,300}",
        "\\PC{0,400}",
    )
        .prop_map(|(severity, rule, location, message)| SummaryRow {
            severity: severity.to_string(),
            rule,
            location,
            message,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn codeql_field_values_fit_discord_limit(rows in prop::collection::vec(row_strategy(), 0..12)) {
        let embed = codeql_embed(&ctx(), &rows);
        for field in &embed.fields {
            prop_assert!(field.value.chars().count() <= MAX_FIELD_VALUE_CHARS);
            prop_assert!(!field.value.is_empty());
        }
    }

    #[test]
    fn failed_tests_field_fits_discord_limit(names in prop::collection::vec("\\PC{0,400}", 1..10)) {
        let t = TestSummary {
            total: names.len() as u64,
            failed: names.len() as u64,
            failed_tests: names,
            ..TestSummary::default()
        };
        let embed = tests_embed(&ctx(), &t);
        for field in &embed.fields {
            prop_assert!(field.value.chars().count() <= MAX_FIELD_VALUE_CHARS);
        }
    }
}
