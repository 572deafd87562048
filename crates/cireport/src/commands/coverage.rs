//! Handler for the `cireport coverage` command.

use anyhow::{Context, Result};
use cireport_config as cli;
use cireport_coverage::CoverageSource;
use cireport_format::console;

use super::write_json;
use crate::config::{ResolvedConfig, resolve_coverage_filter};

pub(crate) fn handle(args: cli::CoverageArgs, resolved: &ResolvedConfig) -> Result<()> {
    let filter = resolve_coverage_filter(&args, &resolved.coverage);

    println!("📊 Parsing coverage data from {}...", args.input.display());
    if filter.include.is_empty() {
        println!("   Including directories: (all)");
    } else {
        println!("   Including directories: {}", filter.include.join(", "));
    }

    let (summary, source) = cireport_coverage::load(&args.input, &filter)
        .context("Failed to load coverage data")?;
    match &source {
        CoverageSource::Lcov(path) => println!("   Read LCOV file: {}", path.display()),
        CoverageSource::Gcov(_) => println!("   No LCOV file found, used gcov files"),
    }

    write_json(&args.output, &summary)?;
    print!(
        "{}",
        console::coverage_recap(&summary, &args.output.display().to_string())
    );
    Ok(())
}
