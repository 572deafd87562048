pub(crate) mod badge;
pub(crate) mod codeql;
pub(crate) mod completions;
pub(crate) mod coverage;
pub(crate) mod gcov_report;
pub(crate) mod notify;
pub(crate) mod summary;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use cireport_config as cli;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ResolvedConfig;

/// Exit code for a failed gate or a failed delivery.
pub(crate) const EXIT_FAIL: i32 = 1;

pub(crate) fn dispatch(cli: cli::Cli, resolved: &ResolvedConfig) -> Result<()> {
    match cli.command {
        cli::Commands::Tests(args) => tests::handle(args),
        cli::Commands::Coverage(args) => coverage::handle(args, resolved),
        cli::Commands::GcovReport(args) => gcov_report::handle(args, resolved),
        cli::Commands::Summary(args) => summary::handle(args, resolved),
        cli::Commands::Notify(args) => notify::handle(args, resolved),
        cli::Commands::Codeql(args) => codeql::handle(args, resolved),
        cli::Commands::Badge(args) => badge::handle(args, resolved),
        cli::Commands::Completions(args) => completions::handle(args),
    }
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))
}

/// Write pretty JSON, creating parent directories.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}
