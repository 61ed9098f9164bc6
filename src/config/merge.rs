//! Configuration merging logic
//!
//! Priority: CLI args > inisort.toml > defaults

use std::path::PathBuf;

use super::toml_schema::RunSection;

/// File processed when no paths are given
pub const DEFAULT_PATH: &str = "./test.ini";

/// Effective settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub default_path: PathBuf,
    pub pause_on_failure: bool,
    pub jobs: Option<usize>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            default_path: PathBuf::from(DEFAULT_PATH),
            pause_on_failure: true,
            jobs: None,
        }
    }
}

/// CLI options that can override config file settings.
///
/// Uses `Option<T>` to distinguish "not specified" from "explicitly set".
#[derive(Debug, Default)]
pub struct CliRunOptions {
    /// If Some(true), never pause (inverted in config)
    pub no_pause: Option<bool>,
    pub jobs: Option<usize>,
}

/// Merge configurations from CLI, TOML, and defaults.
pub fn merge_run_config(cli: &CliRunOptions, toml: Option<&RunSection>) -> RunConfig {
    let defaults = RunConfig::default();

    RunConfig {
        default_path: toml
            .and_then(|t| t.default_path.clone())
            .unwrap_or(defaults.default_path),
        pause_on_failure: cli
            .no_pause
            .map(|no| !no)
            .or_else(|| toml.and_then(|t| t.pause_on_failure))
            .unwrap_or(defaults.pause_on_failure),
        jobs: cli
            .jobs
            .or_else(|| toml.and_then(|t| t.jobs))
            .or(defaults.jobs)
            .filter(|&n| n > 0),
    }
}
