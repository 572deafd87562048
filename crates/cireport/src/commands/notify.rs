//! Handler for the `cireport notify` command.

use std::path::Path;
use std::time::Duration;

use anyhow::{Result, bail};
use cireport_config as cli;
use cireport_notify::{
    CombinedData, Embed, EmbedContext, HttpTransport, NotifyError, Payload, codeql_embed,
    combined_embed, coverage_embed, tests_embed, validate_webhook_url,
};
use cireport_settings::NotifySettings;
use cireport_types::{CoverageSummary, TestSummary};

use super::{EXIT_FAIL, read_json};
use crate::config::ResolvedConfig;
use crate::github;

fn kind_name(kind: cli::NotifyKind) -> &'static str {
    match kind {
        cli::NotifyKind::Tests => "tests",
        cli::NotifyKind::Coverage => "coverage",
        cli::NotifyKind::Combined => "combined",
        cli::NotifyKind::Codeql => "codeql",
    }
}

fn required<'a>(data: Option<&'a Path>, what: &str) -> Result<&'a Path> {
    match data {
        Some(path) => Ok(path),
        None => bail!("{what} file required"),
    }
}

fn deliver(url: &str, payload: &Payload, settings: &NotifySettings) -> Result<(), NotifyError> {
    let transport = HttpTransport::new(Duration::from_secs(settings.timeout_secs))?;
    cireport_notify::send(&transport, url, payload)
}

pub(crate) fn handle(args: cli::NotifyArgs, resolved: &ResolvedConfig) -> Result<()> {
    let Some(url) = github::webhook_url() else {
        println!(
            "⚠️  {} not set, skipping notification",
            github::WEBHOOK_ENV
        );
        return Ok(());
    };
    if let Err(e) = validate_webhook_url(&url) {
        eprintln!("⚠️  {e}");
        return Ok(());
    }

    let settings = NotifySettings {
        server_url: github::server_url(),
        ..resolved.notify.clone()
    };
    let ctx = EmbedContext::now(github::context(), settings.server_url.clone())?;
    let data = args.data.as_deref();

    let (embed, username): (Embed, &str) = match args.kind {
        cli::NotifyKind::Tests => {
            let tests: TestSummary = read_json(required(data, "Test results")?)?;
            (tests_embed(&ctx, &tests), &settings.username)
        }
        cli::NotifyKind::Coverage => {
            let coverage: CoverageSummary = read_json(required(data, "Coverage data")?)?;
            (
                coverage_embed(&ctx, &coverage, &resolved.thresholds),
                &settings.username,
            )
        }
        cli::NotifyKind::Combined => {
            let combined: CombinedData = read_json(required(data, "Combined data")?)?;
            (
                combined_embed(
                    &ctx,
                    &combined.tests,
                    &combined.coverage,
                    &resolved.thresholds,
                ),
                &settings.username,
            )
        }
        cli::NotifyKind::Codeql => {
            println!("📤 Preparing Discord notification...");
            let path = data
                .map(Path::to_path_buf)
                .unwrap_or_else(|| resolved.codeql.summary_path());
            let rows = match cireport_sarif::read_summary(&path) {
                Ok(rows) => rows.unwrap_or_default(),
                Err(e) => {
                    tracing::warn!(error = %e, "could not read CodeQL summary");
                    Vec::new()
                }
            };
            println!("   Found {} finding(s)", rows.len());
            println!("   Sending to Discord...");
            (codeql_embed(&ctx, &rows), &settings.codeql_username)
        }
    };

    let payload = Payload::single(embed, username, &settings.avatar_url);
    let name = kind_name(args.kind);
    match deliver(&url, &payload, &settings) {
        Ok(()) => {
            println!("✅ Successfully sent {name} notification to Discord");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "webhook delivery failed");
            eprintln!("❌ Failed to send {name} notification");
            if args.kind == cli::NotifyKind::Codeql {
                return Ok(());
            }
            std::process::exit(EXIT_FAIL);
        }
    }
}
