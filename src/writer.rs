use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::PipelineError;

/// Overwrite `path` with `content`. No backup is kept.
pub fn write(path: &Path, content: &str) -> Result<(), PipelineError> {
    fs::write(path, content).map_err(|source| PipelineError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = content.len(), "written");
    Ok(())
}
