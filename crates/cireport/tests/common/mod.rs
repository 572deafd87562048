//! Shared helpers for cireport end-to-end tests.

use std::fs;
use std::path::Path;

use assert_cmd::Command;

/// A `cireport` command isolated from the caller's CI environment.
///
/// Runs in `cwd` so no stray `cireport.toml` is picked up, and points the
/// user config directory at `cwd` as well.
pub fn cireport(cwd: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cireport"));
    cmd.current_dir(cwd)
        .env("HOME", cwd)
        .env("XDG_CONFIG_HOME", cwd)
        .env_remove("GITHUB_STEP_SUMMARY")
        .env_remove("GITHUB_CONTEXT")
        .env_remove("GITHUB_SERVER_URL")
        .env_remove("DISCORD_WEBHOOK")
        .env_remove("CIREPORT_LOG");
    cmd
}

pub fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// A CTest `Test.xml` with the given passing count and failing names.
#[allow(dead_code)]
pub fn ctest_xml(passed: usize, failed: &[&str]) -> String {
    let mut body = String::new();
    for i in 0..passed {
        body.push_str(&format!(r#"<Test Status="passed"><Name>ok_{i}</Name></Test>"#));
    }
    for name in failed {
        body.push_str(&format!(r#"<Test Status="failed"><Name>{name}</Name></Test>"#));
    }
    format!("<Site><Testing>{body}</Testing></Site>")
}

/// A SARIF document with one run and the given `(level, rule, uri, line)` results.
#[allow(dead_code)]
pub fn sarif(results: &[(&str, &str, &str, u64)]) -> String {
    let items: Vec<serde_json::Value> = results
        .iter()
        .map(|(level, rule, uri, line)| {
            serde_json::json!({
                "ruleId": rule,
                "level": level,
                "message": { "text": format!("{rule} triggered") },
                "locations": [{
                    "physicalLocation": {
                        "artifactLocation": { "uri": uri },
                        "region": { "startLine": line }
                    }
                }]
            })
        })
        .collect();
    serde_json::json!({
        "version": "2.1.0",
        "runs": [{ "tool": { "driver": { "name": "CodeQL", "rules": [] } }, "results": items }]
    })
    .to_string()
}
