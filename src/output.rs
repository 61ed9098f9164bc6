use std::error::Error;
use std::fmt::Write as _;

use similar::{ChangeTag, TextDiff};

use crate::colors::Colors;
use crate::error::PipelineError;
use crate::pipeline::{FileReport, FileStatus};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Normal,
    Quiet,
    Diff,
}

/// What a run does with each file
#[derive(Debug, Clone, Copy)]
pub struct SortOptions {
    pub check_only: bool,
    pub output_mode: OutputMode,
}

pub struct OutputContext {
    pub mode: OutputMode,
    pub colors: Colors,
    pub verbose: bool,
    pub show_progress: bool,
}

impl OutputContext {
    pub fn new(mode: OutputMode, colors: Colors, verbose: bool, show_progress: bool) -> Self {
        Self {
            mode,
            colors,
            verbose,
            show_progress,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub files_sorted: usize,
    pub files_unchanged: usize,
    pub files_unsorted: usize,
    pub failures: usize,
}

impl RunResult {
    pub fn record(&mut self, status: FileStatus) {
        match status {
            FileStatus::Sorted => self.files_sorted += 1,
            FileStatus::Unchanged => self.files_unchanged += 1,
            FileStatus::Unsorted => self.files_unsorted += 1,
        }
    }

    /// Every requested file went through its pipeline
    pub fn all_succeeded(&self) -> bool {
        self.failures == 0
    }

    /// Check mode found files that are not sorted
    pub fn has_problems(&self) -> bool {
        self.files_unsorted > 0
    }
}

/// Per-file status line (or diff) for a completed pipeline.
///
/// Returns `None` when nothing should be printed for this file.
pub fn format_report(report: &FileReport, ctx: &OutputContext) -> Option<String> {
    let path = report.path.display();
    let colors = &ctx.colors;

    match (report.status, ctx.mode) {
        (FileStatus::Unchanged, OutputMode::Quiet) => None,
        (FileStatus::Unchanged, _) if !ctx.verbose => None,
        (FileStatus::Unchanged, _) => Some(format!(
            "{} {path}",
            colors.paint(colors.unchanged, "Unchanged:")
        )),
        (_, OutputMode::Quiet) => Some(path.to_string()),
        (_, OutputMode::Diff) => Some(format_diff(
            &path.to_string(),
            &report.original,
            &report.sorted,
        )),
        (FileStatus::Sorted, OutputMode::Normal) => {
            Some(format!("{} {path}", colors.paint(colors.changed, "Sorted:")))
        }
        (FileStatus::Unsorted, OutputMode::Normal) => {
            Some(format!("{} {path}", colors.paint(colors.error, "Unsorted:")))
        }
    }
}

/// Error line followed by its cause chain
pub fn format_failure(error: &PipelineError, colors: &Colors) -> String {
    let mut out = format!("{} {error}", colors.paint(colors.error, "Error:"));
    let mut source = error.source();
    while let Some(cause) = source {
        let _ = write!(out, "\n  caused by: {cause}");
        source = cause.source();
    }
    out
}

/// Unified diff between the file as read and the sorted text
pub fn format_diff(label: &str, original: &str, content: &str) -> String {
    let diff = TextDiff::from_lines(original, content);
    let mut out = format!("--- {label}\n+++ {label}\n");

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }

        for op in group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => '-',
                    ChangeTag::Insert => '+',
                    ChangeTag::Equal => ' ',
                };
                let _ = write!(out, "{sign}{change}");
                if change.missing_newline() {
                    out.push('\n');
                }
            }
        }
    }

    // Trailing newline is added by println!
    if out.ends_with('\n') {
        out.pop();
    }
    out
}

/// Closing summary line, or `None` when there is nothing to say
pub fn format_summary(
    result: &RunResult,
    options: &SortOptions,
    ctx: &OutputContext,
) -> Option<String> {
    if ctx.mode == OutputMode::Quiet {
        return None;
    }

    let colors = &ctx.colors;
    let mut parts = vec![];
    if options.check_only {
        if result.files_unsorted > 0 {
            parts.push(colors.paint(
                colors.error,
                &format!("{} files not sorted", result.files_unsorted),
            ));
        }
    } else if result.files_sorted > 0 {
        parts.push(colors.paint(
            colors.changed,
            &format!("{} files sorted", result.files_sorted),
        ));
    }
    if result.failures > 0 {
        parts.push(colors.paint(colors.error, &format!("{} failed", result.failures)));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    fn ctx(mode: OutputMode, verbose: bool) -> OutputContext {
        OutputContext::new(mode, Colors::new(false), verbose, false)
    }

    fn report(status: FileStatus) -> FileReport {
        FileReport {
            path: PathBuf::from("conf.ini"),
            status,
            original: "b=1\na=1\n".to_string(),
            sorted: "a=1\nb=1\n".to_string(),
        }
    }

    #[test]
    fn test_format_sorted_normal() {
        let line = format_report(&report(FileStatus::Sorted), &ctx(OutputMode::Normal, false));
        assert_eq!(line.as_deref(), Some("Sorted: conf.ini"));
    }

    #[test]
    fn test_format_unsorted_quiet_is_bare_path() {
        let line = format_report(&report(FileStatus::Unsorted), &ctx(OutputMode::Quiet, false));
        assert_eq!(line.as_deref(), Some("conf.ini"));
    }

    #[test]
    fn test_format_unchanged_only_when_verbose() {
        let unchanged = report(FileStatus::Unchanged);
        assert_eq!(format_report(&unchanged, &ctx(OutputMode::Normal, false)), None);
        assert_eq!(
            format_report(&unchanged, &ctx(OutputMode::Normal, true)).as_deref(),
            Some("Unchanged: conf.ini")
        );
        assert_eq!(format_report(&unchanged, &ctx(OutputMode::Quiet, true)), None);
    }

    #[test]
    fn test_format_diff_mode() {
        let text = format_report(&report(FileStatus::Sorted), &ctx(OutputMode::Diff, false)).unwrap();
        assert!(text.starts_with("--- conf.ini\n+++ conf.ini\n"));
        assert!(text.lines().any(|l| l.starts_with('+') && !l.starts_with("+++")));
        assert!(text.lines().any(|l| l.starts_with('-') && !l.starts_with("---")));
    }

    #[test]
    fn test_format_failure_includes_cause() {
        let err = PipelineError::Read {
            path: PathBuf::from("missing.ini"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(
            format_failure(&err, &Colors::new(false)),
            "Error: missing.ini: error during file reading\n  caused by: not found"
        );
    }

    #[test]
    fn test_summary() {
        let options = SortOptions {
            check_only: false,
            output_mode: OutputMode::Normal,
        };
        let result = RunResult {
            files_sorted: 2,
            failures: 1,
            ..RunResult::default()
        };
        assert_eq!(
            format_summary(&result, &options, &ctx(OutputMode::Normal, false)).as_deref(),
            Some("2 files sorted, 1 failed")
        );
        assert_eq!(
            format_summary(&RunResult::default(), &options, &ctx(OutputMode::Normal, false)),
            None
        );
        assert_eq!(format_summary(&result, &options, &ctx(OutputMode::Quiet, false)), None);
    }

    #[test]
    fn test_run_result_flags() {
        let mut result = RunResult::default();
        result.record(FileStatus::Unsorted);
        assert!(result.has_problems());
        assert!(result.all_succeeded());
        result.failures += 1;
        assert!(!result.all_succeeded());
    }
}
