//! Template generation for `--init` command

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::file::CONFIG_FILE_NAME;

/// Template inisort.toml with documentation
pub const INISORT_TOML_TEMPLATE: &str = r#"# inisort.toml - Configuration for the inisort INI sorter
#
# inisort rewrites INI files in place:
# - Entries inside each section are sorted by their text
# - Comment lines stay attached to the entry below them
# - Sections are ordered by name, entries before any header come first
# - The file's line endings (LF or CRLF) are kept
#
# The settings below control how a run behaves. Uncomment and modify
# as needed; command line flags take priority over this file.

[run]
# File processed when inisort is started without any path.
# Default: "./test.ini"
# default_path = "./test.ini"

# Wait for Enter before exiting when a file could not be sorted.
# Same as passing --no-pause when set to false.
# Default: true
# pause_on_failure = true

# Number of worker threads used for several files.
# Comment out to use one thread per CPU core.
# jobs = 4
"#;

/// Generate inisort.toml in the specified directory (or current directory if None).
///
/// Returns an error if inisort.toml already exists.
pub fn generate_init_file_in(dir: Option<&Path>) -> io::Result<PathBuf> {
    let path = dir.map_or_else(|| PathBuf::from(CONFIG_FILE_NAME), |d| d.join(CONFIG_FILE_NAME));

    if path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{CONFIG_FILE_NAME} already exists"),
        ));
    }

    fs::write(&path, INISORT_TOML_TEMPLATE)?;
    Ok(path)
}

/// Generate inisort.toml in the current directory.
pub fn generate_init_file() -> io::Result<PathBuf> {
    generate_init_file_in(None)
}
