//! Error types for the per-file pipeline.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure of one stage of a single file's pipeline.
///
/// Every variant carries the path so that batch runs can report failures
/// independently of each other.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The file is missing, unreadable or not valid UTF-8
    #[error("{}: error during file reading", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Unexpected failure while splitting the text into sections
    #[error("{}: error during analysis: {message}", .path.display())]
    Analysis { path: PathBuf, message: String },

    /// Unexpected failure while reordering or serializing
    #[error("{}: error during sorting: {message}", .path.display())]
    Sort { path: PathBuf, message: String },

    /// The sorted text could not be written back
    #[error("{}: error during file writing", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PipelineError {
    pub fn path(&self) -> &Path {
        match self {
            PipelineError::Read { path, .. }
            | PipelineError::Analysis { path, .. }
            | PipelineError::Sort { path, .. }
            | PipelineError::Write { path, .. } => path,
        }
    }

    /// Short stage name used in log fields
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Read { .. } => "read",
            PipelineError::Analysis { .. } => "analysis",
            PipelineError::Sort { .. } => "sort",
            PipelineError::Write { .. } => "write",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_read_error_display_and_source() {
        let err = PipelineError::Read {
            path: PathBuf::from("missing.ini"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };

        assert_eq!(err.to_string(), "missing.ini: error during file reading");
        assert_eq!(err.source().unwrap().to_string(), "no such file");
        assert_eq!(err.stage(), "read");
        assert_eq!(err.path(), Path::new("missing.ini"));
    }

    #[test]
    fn test_analysis_error_has_message() {
        let err = PipelineError::Analysis {
            path: PathBuf::from("a.ini"),
            message: "boom".to_string(),
        };

        assert_eq!(err.to_string(), "a.ini: error during analysis: boom");
        assert!(err.source().is_none());
    }
}
