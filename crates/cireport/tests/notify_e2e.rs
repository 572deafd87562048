//! End-to-end tests for `cireport notify` paths that never reach the network.

mod common;

use common::{cireport, write};
use predicates::prelude::*;
use tempfile::tempdir;

const WEBHOOK: &str = "https://discord.com/api/webhooks/123/abc";

#[test]
fn notify_without_webhook_skips() {
    let tmp = tempdir().unwrap();
    write(tmp.path(), "test-results.json", r#"{"total": 1, "passed": 1}"#);

    cireport(tmp.path())
        .args(["notify", "tests", "test-results.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "DISCORD_WEBHOOK not set, skipping notification",
        ));
}

#[test]
fn notify_with_empty_webhook_skips() {
    let tmp = tempdir().unwrap();

    cireport(tmp.path())
        .args(["notify", "codeql"])
        .env("DISCORD_WEBHOOK", "")
        .assert()
        .success()
        .stdout(predicate::str::contains("skipping notification"));
}

#[test]
fn notify_rejects_foreign_webhook_url_without_failing() {
    let tmp = tempdir().unwrap();
    write(tmp.path(), "test-results.json", r#"{"total": 1, "passed": 1}"#);

    cireport(tmp.path())
        .args(["notify", "tests", "test-results.json"])
        .env("DISCORD_WEBHOOK", "https://example.com/hook")
        .assert()
        .success()
        .stderr(predicate::str::contains("Invalid Discord webhook URL format"));
}

#[test]
fn notify_tests_requires_data_file() {
    let tmp = tempdir().unwrap();

    cireport(tmp.path())
        .args(["notify", "tests"])
        .env("DISCORD_WEBHOOK", WEBHOOK)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Test results file required"));
}

#[test]
fn notify_combined_reports_bad_json() {
    let tmp = tempdir().unwrap();
    write(tmp.path(), "combined.json", "[1, 2");

    cireport(tmp.path())
        .args(["notify", "combined", "combined.json"])
        .env("DISCORD_WEBHOOK", WEBHOOK)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse JSON"));
}
