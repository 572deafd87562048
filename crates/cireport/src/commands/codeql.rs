//! Handlers for the `cireport codeql` subcommands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use cireport_config as cli;
use cireport_format::{annotations, console, findings_html};
use cireport_gate::FindingsGate;
use cireport_settings::CodeqlSettings;
use cireport_types::{SeverityCounts, SummaryRow};

use super::EXIT_FAIL;
use crate::config::ResolvedConfig;
use crate::github;

pub(crate) fn handle(args: cli::CodeqlArgs, resolved: &ResolvedConfig) -> Result<()> {
    match args.command {
        cli::CodeqlCommand::Summarize(args) => summarize(args, &resolved.codeql),
        cli::CodeqlCommand::Check(args) => check(args, &resolved.codeql),
        cli::CodeqlCommand::Publish(args) => publish(args, &resolved.codeql),
    }
}

fn load_rows(path: &Path) -> Result<Vec<SummaryRow>> {
    let rows = cireport_sarif::read_summary(path)
        .with_context(|| format!("Failed to load CodeQL summary {}", path.display()))?;
    if rows.is_none() {
        tracing::warn!(path = %path.display(), "CodeQL summary not found");
    }
    Ok(rows.unwrap_or_default())
}

fn summarize(args: cli::SummarizeArgs, base: &CodeqlSettings) -> Result<()> {
    let settings = CodeqlSettings {
        dir: args.dir.unwrap_or_else(|| base.dir.clone()),
        ..base.clone()
    };
    fs::create_dir_all(&settings.dir)
        .with_context(|| format!("Failed to create {}", settings.dir.display()))?;

    let scan = cireport_sarif::scan_dir(&settings).context("Failed to scan SARIF files")?;
    if scan.files.is_empty() {
        println!("No SARIF files found in {}", settings.dir.display());
        return Ok(());
    }

    println!("Processing {} SARIF file(s)...", scan.files.len());
    for (path, count) in &scan.files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        println!("  {name}: {count} finding(s)");
    }

    if scan.findings.is_empty() {
        println!("No results found in SARIF files");
        return Ok(());
    }

    let output = settings.summary_path();
    cireport_sarif::write_summary(&output, &scan.findings)?;
    for finding in &scan.findings {
        println!("{}", finding.to_tsv());
    }
    print!("{}", console::findings_statistics(&scan.findings));
    println!("\nWrote summary to {}", output.display());
    Ok(())
}

fn check(args: cli::CheckArgs, base: &CodeqlSettings) -> Result<()> {
    println!("Checking CodeQL findings...");

    let gate = match args.fail_on.as_deref() {
        Some(list) => list
            .parse::<FindingsGate>()
            .context("Invalid --fail-on list")?,
        None => FindingsGate::new(base.fail_on.clone()),
    };

    let path = args.summary.unwrap_or_else(|| base.summary_path());
    let rows = load_rows(&path)?;
    let counts = SeverityCounts::from_rows(&rows);
    print!("{}", console::check_summary(&counts));

    let result = gate.evaluate(&counts);
    if !result.passed {
        println!(
            "❌ FAILING: Found {} error(s) and {} warning(s)",
            result.errors, result.warnings
        );
        println!("   Failed severity levels: {}", gate.describe());
        println!("\n💡 Review the CodeQL summary and SARIF artifacts for details");
        std::process::exit(EXIT_FAIL);
    }

    println!("✅ No critical or high severity findings detected");
    println!("   Job will continue");
    Ok(())
}

fn publish(args: cli::PublishArgs, base: &CodeqlSettings) -> Result<()> {
    println!("Loading CodeQL summary...");
    let path = args.summary.unwrap_or_else(|| base.summary_path());
    let rows = load_rows(&path)?;
    if rows.is_empty() {
        println!("No findings to publish");
        return Ok(());
    }
    println!("Loaded {} finding(s)", rows.len());

    println!("Generating HTML summary...");
    let html = findings_html(&rows, args.max_rows.unwrap_or(base.max_table_rows));
    match github::step_summary_path() {
        Some(summary) => match github::append_step_summary(&summary, &format!("\n{html}")) {
            Ok(()) => println!("✓ Published summary to {}", summary.display()),
            Err(e) => tracing::error!(error = %format!("{e:#}"), "could not write step summary"),
        },
        None => {
            println!("{} not set, printing to stdout:", github::STEP_SUMMARY_ENV);
            println!("{html}");
        }
    }

    let max = args.max_annotations.unwrap_or(base.max_annotations);
    println!("Creating annotations (max {max})...");
    let created = annotations(&rows, max);
    for annotation in &created {
        println!("{annotation}");
    }
    if !created.is_empty() {
        println!("✓ Created {} annotation(s)", created.len());
    }

    println!("✓ Summary publication complete");
    Ok(())
}
