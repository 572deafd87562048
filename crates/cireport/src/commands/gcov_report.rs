//! Handler for the `cireport gcov-report` command.

use anyhow::{Context, Result};
use cireport_config as cli;
use cireport_format::console;

use crate::config::{ResolvedConfig, resolve_gcov};

pub(crate) fn handle(args: cli::GcovReportArgs, resolved: &ResolvedConfig) -> Result<()> {
    let settings = resolve_gcov(&args, &resolved.gcov);
    let report = cireport_coverage::run_gcov(&settings).context("Failed to build gcov report")?;
    print!(
        "{}",
        console::gcov_report(&report, settings.target, &settings.source_filter)
    );
    Ok(())
}
