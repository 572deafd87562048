//! GitHub Actions environment.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cireport_types::GithubContext;
use cireport_types::context::DEFAULT_SERVER_URL;

pub(crate) const STEP_SUMMARY_ENV: &str = "GITHUB_STEP_SUMMARY";
pub(crate) const CONTEXT_ENV: &str = "GITHUB_CONTEXT";
pub(crate) const SERVER_URL_ENV: &str = "GITHUB_SERVER_URL";
pub(crate) const WEBHOOK_ENV: &str = "DISCORD_WEBHOOK";

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// `$GITHUB_CONTEXT`, or an empty context when unset or invalid.
pub(crate) fn context() -> GithubContext {
    non_empty_env(CONTEXT_ENV)
        .map(|json| GithubContext::from_json(&json))
        .unwrap_or_default()
}

pub(crate) fn server_url() -> String {
    non_empty_env(SERVER_URL_ENV).unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
}

pub(crate) fn webhook_url() -> Option<String> {
    non_empty_env(WEBHOOK_ENV)
}

pub(crate) fn step_summary_path() -> Option<PathBuf> {
    non_empty_env(STEP_SUMMARY_ENV).map(PathBuf::from)
}

/// Append `text` to the step summary file, creating it when missing.
pub(crate) fn append_step_summary(path: &Path, text: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open step summary {}", path.display()))?;
    file.write_all(text.as_bytes())
        .with_context(|| format!("Failed to write step summary {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_keeps_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.md");
        append_step_summary(&path, "one\n").unwrap();
        append_step_summary(&path, "two\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }
}
