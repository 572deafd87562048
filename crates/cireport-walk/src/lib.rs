//! # cireport-walk
//!
//! **Tier 1 (Utilities)**
//!
//! Report discovery. Build trees are usually git-ignored, so traversal here
//! disables every ignore filter and matches paths against glob patterns
//! relative to the search root.
//!
//! ## What belongs here
//! * Filesystem traversal with glob matching
//! * Deterministic (sorted, deduplicated) result lists
//!
//! ## What does NOT belong here
//! * Parsing report contents
//! * File modification

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

/// Compile patterns where `*` does not cross `/` and `**` does.
fn glob_set(patterns: &[&str]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .with_context(|| format!("Invalid glob pattern: {pattern}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

/// All files under `root` matching any of `patterns`.
///
/// Patterns are matched against the `/`-separated path relative to `root`.
/// The result holds `root`-joined paths, sorted and free of duplicates.
/// A missing root yields an empty list.
pub fn find_files(root: &Path, patterns: &[&str]) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        tracing::debug!(root = %root.display(), "search root is not a directory");
        return Ok(Vec::new());
    }

    let set = glob_set(patterns)?;
    let mut files: Vec<PathBuf> = Vec::new();
    let mut builder = WalkBuilder::new(root);
    builder.standard_filters(false);
    builder.follow_links(false);

    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let path = entry.path();
        let rel = path.strip_prefix(root).unwrap_or(path);
        let rel = rel.to_string_lossy().replace('\\', "/");
        if set.is_match(&rel) {
            files.push(path.to_path_buf());
        }
    }

    files.sort_by(|a, b| a.to_string_lossy().cmp(&b.to_string_lossy()));
    files.dedup();
    Ok(files)
}

/// First match (in sorted order) for `pattern` under `root`.
pub fn find_first(root: &Path, pattern: &str) -> Result<Option<PathBuf>> {
    Ok(find_files(root, &[pattern])?.into_iter().next())
}

/// Immediate subdirectories of `dir`, sorted by name.
pub fn subdirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))?;
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            out.push(entry.path());
        }
    }
    out.sort();
    Ok(out)
}
