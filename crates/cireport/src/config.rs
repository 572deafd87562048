use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cireport_config::{
    CodeqlConfig, CoverageArgs, CoverageConfig, GcovConfig, GcovReportArgs, NotifyConfig,
    ThresholdsConfig, TomlConfig,
};
use cireport_settings::{
    CodeqlSettings, CoverageFilter, GcovReportSettings, NotifySettings, Thresholds,
};
use cireport_types::Severity;

/// Project-local config file name.
pub(crate) const CONFIG_FILE: &str = "cireport.toml";

/// `--config`, else `./cireport.toml`, else `<config_dir>/cireport/config.toml`.
pub(crate) fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let local = PathBuf::from(CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }
    let user = dirs::config_dir()?.join("cireport").join("config.toml");
    user.is_file().then_some(user)
}

pub(crate) fn load_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    match config_path(explicit) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            TomlConfig::from_file(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))
        }
        None => Ok(TomlConfig::default()),
    }
}

/// Settings after overlaying `cireport.toml` on the built-in defaults.
///
/// Sections with per-command CLI flags stay raw and are finished by
/// [`resolve_coverage_filter`] and [`resolve_gcov`].
#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    pub thresholds: Thresholds,
    pub codeql: CodeqlSettings,
    pub notify: NotifySettings,
    pub coverage: CoverageConfig,
    pub gcov: GcovConfig,
}

impl ResolvedConfig {
    pub fn from_toml(toml: &TomlConfig) -> Result<Self> {
        Ok(Self {
            thresholds: resolve_thresholds(&toml.thresholds),
            codeql: resolve_codeql(&toml.codeql)?,
            notify: resolve_notify(&toml.notify),
            coverage: toml.coverage.clone(),
            gcov: toml.gcov.clone(),
        })
    }
}

pub fn resolve_thresholds(cfg: &ThresholdsConfig) -> Thresholds {
    let defaults = Thresholds::default();
    Thresholds {
        good: cfg.good.unwrap_or(defaults.good),
        moderate: cfg.moderate.unwrap_or(defaults.moderate),
    }
}

pub fn resolve_coverage_filter(args: &CoverageArgs, cfg: &CoverageConfig) -> CoverageFilter {
    let mut filter = CoverageFilter::default();
    if !args.include.is_empty() {
        filter = filter.with_include_dirs(&args.include);
    } else if let Some(include) = &cfg.include {
        filter = filter.with_include_dirs(include);
    }
    if !args.exclude.is_empty() {
        filter.exclude = args.exclude.clone();
    } else if let Some(exclude) = &cfg.exclude {
        filter.exclude = exclude.clone();
    }
    filter
}

pub fn resolve_codeql(cfg: &CodeqlConfig) -> Result<CodeqlSettings> {
    let defaults = CodeqlSettings::default();
    let fail_on = match &cfg.fail_on {
        Some(levels) => levels
            .iter()
            .map(|s| {
                s.parse::<Severity>()
                    .map_err(anyhow::Error::msg)
                    .context("Invalid codeql.fail_on in config")
            })
            .collect::<Result<Vec<_>>>()?,
        None => defaults.fail_on,
    };
    Ok(CodeqlSettings {
        dir: cfg.dir.clone().unwrap_or(defaults.dir),
        skip_patterns: cfg.skip_patterns.clone().unwrap_or(defaults.skip_patterns),
        fail_on,
        max_table_rows: cfg.max_table_rows.unwrap_or(defaults.max_table_rows),
        max_annotations: cfg.max_annotations.unwrap_or(defaults.max_annotations),
    })
}

pub fn resolve_notify(cfg: &NotifyConfig) -> NotifySettings {
    let defaults = NotifySettings::default();
    NotifySettings {
        username: cfg.username.clone().unwrap_or(defaults.username),
        codeql_username: cfg.codeql_username.clone().unwrap_or(defaults.codeql_username),
        avatar_url: cfg.avatar_url.clone().unwrap_or(defaults.avatar_url),
        timeout_secs: cfg.timeout_secs.unwrap_or(defaults.timeout_secs),
        server_url: defaults.server_url,
    }
}

pub fn resolve_gcov(args: &GcovReportArgs, cfg: &GcovConfig) -> GcovReportSettings {
    let defaults = GcovReportSettings::default();
    GcovReportSettings {
        build_dir: args
            .build_dir
            .clone()
            .or_else(|| cfg.build_dir.clone())
            .unwrap_or(defaults.build_dir),
        objects_dir: args
            .objects
            .clone()
            .or_else(|| cfg.objects_dir.clone())
            .unwrap_or(defaults.objects_dir),
        source_filter: args
            .source_filter
            .clone()
            .or_else(|| cfg.source_filter.clone())
            .unwrap_or(defaults.source_filter),
        extensions: cfg.extensions.clone().unwrap_or(defaults.extensions),
        target: args.target.or(cfg.target).unwrap_or(defaults.target),
    }
}
