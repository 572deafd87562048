//! Handler for the `cireport summary` command.

use anyhow::{Result, bail};
use cireport_config as cli;
use cireport_format::{combined_markdown, coverage_markdown, tests_markdown};
use cireport_types::{CoverageSummary, TestSummary};

use super::read_json;
use crate::config::ResolvedConfig;
use crate::github;

pub(crate) fn handle(args: cli::SummaryArgs, resolved: &ResolvedConfig) -> Result<()> {
    let markdown = match args.kind {
        cli::SummaryKind::Tests => {
            let tests: TestSummary = read_json(&args.inputs[0])?;
            tests_markdown(&tests)
        }
        cli::SummaryKind::Coverage => {
            let coverage: CoverageSummary = read_json(&args.inputs[0])?;
            coverage_markdown(&coverage, &resolved.thresholds)
        }
        cli::SummaryKind::Combined => {
            let [tests_path, coverage_path] = args.inputs.as_slice() else {
                bail!("Both test results and coverage data JSON files required");
            };
            let tests: TestSummary = read_json(tests_path)?;
            let coverage: CoverageSummary = read_json(coverage_path)?;
            combined_markdown(&tests, &coverage, &resolved.thresholds)
        }
    };

    if args.inputs.len() > 1 && args.kind != cli::SummaryKind::Combined {
        tracing::warn!(
            ignored = %args.inputs[1].display(),
            "extra input ignored for this summary kind"
        );
    }

    match github::step_summary_path() {
        Some(path) => {
            github::append_step_summary(&path, &format!("{markdown}\n"))?;
            println!("✅ Summary written to GitHub Actions");
        }
        None => println!("{markdown}"),
    }
    Ok(())
}
