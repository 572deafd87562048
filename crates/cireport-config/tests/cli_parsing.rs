//! Tests verifying CLI parsing and default values.

use std::path::PathBuf;

use cireport_config::{
    BadgeMetric, Cli, CodeqlCommand, Commands, NotifyKind, SummaryKind,
};
use clap::Parser;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("cireport").chain(args.iter().copied()))
        .expect("valid arguments")
}

// =========================================================================
// Defaults
// =========================================================================

#[test]
fn tests_output_defaults_to_test_results_json() {
    let cli = parse(&["tests", "build"]);
    let Commands::Tests(args) = cli.command else {
        panic!("expected tests");
    };
    assert_eq!(args.build_dir, PathBuf::from("build"));
    assert_eq!(args.output, PathBuf::from("test-results.json"));
}

#[test]
fn coverage_include_splits_on_commas() {
    let cli = parse(&["coverage", "build", "--include", "client,server", "-o", "out/c.json"]);
    let Commands::Coverage(args) = cli.command else {
        panic!("expected coverage");
    };
    assert_eq!(args.include, vec!["client", "server"]);
    assert_eq!(args.output, PathBuf::from("out/c.json"));
    assert!(args.exclude.is_empty());
}

#[test]
fn badge_metric_defaults_to_line() {
    let cli = parse(&["badge", "coverage.json"]);
    let Commands::Badge(args) = cli.command else {
        panic!("expected badge");
    };
    assert_eq!(args.metric, BadgeMetric::Line);
    assert!(args.output.is_none());
}

// =========================================================================
// Subcommands
// =========================================================================

#[test]
fn summary_combined_takes_two_inputs() {
    let cli = parse(&["summary", "combined", "t.json", "c.json"]);
    let Commands::Summary(args) = cli.command else {
        panic!("expected summary");
    };
    assert_eq!(args.kind, SummaryKind::Combined);
    assert_eq!(args.inputs.len(), 2);
}

#[test]
fn summary_rejects_three_inputs() {
    let result = Cli::try_parse_from(["cireport", "summary", "tests", "a", "b", "c"]);
    assert!(result.is_err());
}

#[test]
fn notify_codeql_needs_no_data() {
    let cli = parse(&["notify", "codeql"]);
    let Commands::Notify(args) = cli.command else {
        panic!("expected notify");
    };
    assert_eq!(args.kind, NotifyKind::Codeql);
    assert!(args.data.is_none());
}

#[test]
fn codeql_check_accepts_fail_on() {
    let cli = parse(&["codeql", "check", "--fail-on", "error"]);
    let Commands::Codeql(args) = cli.command else {
        panic!("expected codeql");
    };
    let CodeqlCommand::Check(check) = args.command else {
        panic!("expected check");
    };
    assert_eq!(check.fail_on.as_deref(), Some("error"));
    assert!(check.summary.is_none());
}

#[test]
fn global_flags_work_after_subcommand() {
    let cli = parse(&["codeql", "summarize", "-vv", "--config", "ci.toml"]);
    assert_eq!(cli.global.verbose, 2);
    assert_eq!(cli.global.config, Some(PathBuf::from("ci.toml")));
}

#[test]
fn unknown_notify_kind_is_rejected() {
    assert!(Cli::try_parse_from(["cireport", "notify", "pager"]).is_err());
}
