//! Per-file pipeline (load, parse, sort, write) and the concurrent batch runner.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info};

use crate::document::Document;
use crate::error::PipelineError;
use crate::{loader, parser, sorter, writer};

/// What happened to a file whose pipeline completed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// Sorted text differed and was written back
    Sorted,
    /// Already sorted, nothing written
    Unchanged,
    /// Check mode: sorting would change the file
    Unsorted,
}

#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub status: FileStatus,
    pub original: String,
    pub sorted: String,
}

pub type FileOutcome = Result<FileReport, PipelineError>;

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Run `stage`, turning a panic into its message
fn guarded<T>(stage: impl FnOnce() -> T) -> Result<T, String> {
    panic::catch_unwind(AssertUnwindSafe(stage)).map_err(panic_message)
}

/// Split the loaded text into sections.
pub fn analyze(doc: &mut Document, path: &Path) -> Result<(), PipelineError> {
    let parsed = guarded(|| parser::parse(&doc.original)).map_err(|message| {
        PipelineError::Analysis {
            path: path.to_path_buf(),
            message,
        }
    })?;

    debug!(
        path = %path.display(),
        sections = parsed.sections.len(),
        unlisted = parsed.unlisted.len(),
        "analyzed"
    );
    doc.sections = parsed.sections;
    doc.unlisted = parsed.unlisted;
    Ok(())
}

/// Reorder the analyzed sections and render the final text.
pub fn sort(doc: &mut Document, path: &Path) -> Result<(), PipelineError> {
    doc.sorted = guarded(|| sorter::sort_text(&doc.sections, &doc.unlisted, doc.line_ending))
        .map_err(|message| PipelineError::Sort {
            path: path.to_path_buf(),
            message,
        })?;
    Ok(())
}

/// Run the whole pipeline for one path. The first failing stage ends it.
pub fn process_file(path: &Path, check_only: bool) -> FileOutcome {
    let mut doc = loader::load(path)?;
    analyze(&mut doc, path)?;
    sort(&mut doc, path)?;

    let status = if doc.is_unchanged() {
        FileStatus::Unchanged
    } else if check_only {
        FileStatus::Unsorted
    } else {
        writer::write(path, &doc.sorted)?;
        info!(path = %path.display(), "rewritten");
        FileStatus::Sorted
    };

    Ok(FileReport {
        path: path.to_path_buf(),
        status,
        original: doc.original,
        sorted: doc.sorted,
    })
}

/// Process every path as an independent task and wait for all of them.
///
/// `on_done` is called as soon as each file settles. Outcomes are returned
/// in the order of `paths`.
pub fn process_all<F>(paths: &[PathBuf], check_only: bool, on_done: F) -> Vec<FileOutcome>
where
    F: Fn(&FileOutcome) + Sync,
{
    paths
        .par_iter()
        .map(|path| {
            let outcome = process_file(path, check_only);
            on_done(&outcome);
            outcome
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    #[test]
    fn test_panic_message_variants() {
        assert_eq!(guarded(|| -> u8 { panic!("static") }), Err("static".to_string()));
        let n = 3;
        assert_eq!(
            guarded(|| -> u8 { panic!("formatted {n}") }),
            Err("formatted 3".to_string())
        );
        assert_eq!(guarded(|| 7), Ok(7));
    }

    #[test]
    fn test_process_file_rewrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.ini");
        fs::write(&path, "[b]\nkey2=2\nkey1=1\n[a]\nx=1\n").unwrap();

        let report = process_file(&path, false).unwrap();
        assert_eq!(report.status, FileStatus::Sorted);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[a]\nx=1\n\n[b]\nkey1=1\nkey2=2\n"
        );
    }

    #[test]
    fn test_process_file_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.ini");
        fs::write(&path, "[a]\nx=1\n").unwrap();

        let report = process_file(&path, false).unwrap();
        assert_eq!(report.status, FileStatus::Unchanged);
    }

    #[test]
    fn test_process_file_check_only_does_not_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.ini");
        fs::write(&path, "b=1\na=1\n").unwrap();

        let report = process_file(&path, true).unwrap();
        assert_eq!(report.status, FileStatus::Unsorted);
        assert_eq!(report.sorted, "a=1\nb=1\n");
        assert_eq!(fs::read_to_string(&path).unwrap(), "b=1\na=1\n");
    }

    #[test]
    fn test_process_file_preserves_crlf() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.ini");
        fs::write(&path, "[s]\r\nb=1\r\na=1\r\n").unwrap();

        process_file(&path, false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[s]\r\na=1\r\nb=1\r\n");
    }

    #[test]
    fn test_process_file_missing() {
        let dir = TempDir::new().unwrap();
        let err = process_file(&dir.path().join("missing.ini"), false).unwrap_err();
        assert_eq!(err.stage(), "read");
    }

    #[test]
    fn test_process_all_isolates_failures() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.ini");
        let missing = dir.path().join("missing.ini");
        fs::write(&good, "[z]\nb=1\na=1\n").unwrap();

        let settled = AtomicUsize::new(0);
        let outcomes = process_all(&[missing, good.clone()], false, |_| {
            settled.fetch_add(1, Ordering::Relaxed);
        });

        assert_eq!(settled.load(Ordering::Relaxed), 2);
        assert!(outcomes[0].is_err());
        assert_eq!(outcomes[1].as_ref().unwrap().path, good);
        assert_eq!(fs::read_to_string(&good).unwrap(), "[z]\na=1\nb=1\n");
    }
}
