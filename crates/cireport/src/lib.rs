//! # cireport
//!
//! **CLI Binary**
//!
//! This is the entry point for the `cireport` command-line application.
//! It orchestrates the other crates to perform the requested actions.
//!
//! ## Responsibilities
//! * Parse command line arguments
//! * Load configuration
//! * Dispatch commands to appropriate handlers
//! * Handle errors and exit codes
//!
//! This crate should contain minimal business logic.

mod commands;
mod config;
mod error_hints;
mod github;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cireport_config::Cli;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "CIREPORT_LOG";

pub use config::{
    ResolvedConfig, resolve_codeql, resolve_coverage_filter, resolve_gcov, resolve_notify,
    resolve_thresholds,
};

/// Format an error with actionable hints.
pub fn format_error(err: &anyhow::Error) -> String {
    error_hints::format(err)
}

fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

/// Entry point used by the `cireport` binary.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let toml = config::load_config(cli.global.config.as_deref())?;
    let resolved = ResolvedConfig::from_toml(&toml)?;
    commands::dispatch(cli, &resolved)
}
