//! Configuration file support for inisort.
//!
//! This module provides:
//! - Loading configuration from `inisort.toml`
//! - Config file discovery (search upward from current directory)
//! - Merging CLI args, config file, and defaults
//! - Template generation with `--init`

mod file;
mod init;
mod merge;
mod toml_schema;

pub use file::{find_config_file, find_file_upward, load_config, ConfigError, CONFIG_FILE_NAME};
pub use init::{generate_init_file, generate_init_file_in, INISORT_TOML_TEMPLATE};
pub use merge::{merge_run_config, CliRunOptions, RunConfig, DEFAULT_PATH};
pub use toml_schema::{InisortToml, RunSection};
