//! GitHub Actions run context.

use serde::Deserialize;
use serde_json::Value;

pub const DEFAULT_SERVER_URL: &str = "https://github.com";

/// The subset of `${{ toJson(github) }}` used in notifications.
///
/// Every field is optional; accessors supply the display defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GithubContext {
    pub repository: Option<String>,
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    pub sha: Option<String>,
    pub actor: Option<String>,
    /// GitHub emits this as a string, hand-written contexts often use a number.
    pub run_id: Option<Value>,
}

impl GithubContext {
    /// Parse a context document. Invalid JSON yields an empty context.
    pub fn from_json(text: &str) -> Self {
        serde_json::from_str(text).unwrap_or_default()
    }

    pub fn repository(&self) -> &str {
        self.repository.as_deref().unwrap_or("unknown/repo")
    }

    /// Branch name with `refs/heads/` removed.
    pub fn branch(&self) -> String {
        self.git_ref
            .as_deref()
            .unwrap_or("unknown")
            .replace("refs/heads/", "")
    }

    /// First seven characters of the commit SHA.
    pub fn short_sha(&self) -> String {
        self.sha.as_deref().unwrap_or("unknown").chars().take(7).collect()
    }

    pub fn actor(&self) -> &str {
        self.actor.as_deref().unwrap_or("unknown")
    }

    /// Run id as text, `None` when missing, empty, or zero.
    pub fn run_id(&self) -> Option<String> {
        match self.run_id.as_ref()? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
            _ => None,
        }
    }

    /// `{server}/{repo}/actions/runs/{run_id}` when a run id is known.
    pub fn workflow_url(&self, server_url: &str) -> Option<String> {
        self.run_id()
            .map(|id| format!("{server_url}/{}/actions/runs/{id}", self.repository()))
    }

    /// `Branch: main • Commit: abc1234 • By: octocat`
    pub fn footer(&self) -> String {
        format!(
            "Branch: {} • Commit: {} • By: {}",
            self.branch(),
            self.short_sha(),
            self.actor()
        )
    }
}
