//! Handler for the `cireport badge` command.

use std::fs;

use anyhow::{Context, Result};
use cireport_badge::{coverage_badge, tests_badge};
use cireport_config as cli;
use cireport_types::{CoverageSummary, TestSummary};

use super::read_json;
use crate::config::ResolvedConfig;

pub(crate) fn handle(args: cli::BadgeArgs, resolved: &ResolvedConfig) -> Result<()> {
    let svg = match args.metric {
        cli::BadgeMetric::Tests => {
            let tests: TestSummary = read_json(&args.input)?;
            tests_badge(&tests)
        }
        metric => {
            let coverage: CoverageSummary = read_json(&args.input)?;
            let (default_label, pct) = match metric {
                cli::BadgeMetric::Function => ("functions", coverage.function_coverage),
                cli::BadgeMetric::Branch => ("branches", coverage.branch_coverage),
                _ => ("coverage", coverage.line_coverage),
            };
            let label = args.label.as_deref().unwrap_or(default_label);
            coverage_badge(label, pct, &resolved.thresholds)
        }
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &svg)
                .with_context(|| format!("Failed to write badge to {}", path.display()))?;
            println!("Wrote badge to {}", path.display());
        }
        None => println!("{svg}"),
    }
    Ok(())
}
