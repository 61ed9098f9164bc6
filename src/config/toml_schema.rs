//! TOML schema definitions for inisort.toml

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root structure for inisort.toml
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InisortToml {
    /// Run settings
    #[serde(default)]
    pub run: RunSection,
}

/// `[run]` section in inisort.toml
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunSection {
    /// File processed when no paths are given (default: ./test.ini)
    pub default_path: Option<PathBuf>,

    /// Wait for acknowledgement when a file fails (default: true)
    pub pause_on_failure: Option<bool>,

    /// Worker threads for batches (None = one per core)
    pub jobs: Option<usize>,
}
