pub mod colors;
pub mod config;
pub mod document;
pub mod error;
pub mod loader;
pub mod logging;
mod output;
pub mod parser;
pub mod pipeline;
pub mod progress;
pub mod sorter;
pub mod writer;

pub use colors::{detect_colors, should_use_colors, Colors};
pub use config::{
    find_config_file, generate_init_file, load_config, merge_run_config, CliRunOptions,
    ConfigError, InisortToml, RunConfig, RunSection, DEFAULT_PATH, INISORT_TOML_TEMPLATE,
};
pub use document::{Document, LineEnding, Section, Setting};
pub use error::PipelineError;
pub use loader::detect_line_ending;
pub use output::{format_diff, OutputContext, OutputMode, RunResult, SortOptions};
pub use parser::{parse, ParsedIni};
pub use pipeline::{process_all, process_file, FileOutcome, FileReport, FileStatus};
pub use progress::ProgressReporter;

use std::path::{Path, PathBuf};

/// Sort INI text in memory, keeping its line ending convention
pub fn sort_ini(text: &str) -> String {
    let parsed = parse(text);
    sorter::sort_text(&parsed.sections, &parsed.unlisted, detect_line_ending(text))
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Main entry point: run every path through its own pipeline
pub fn run(paths: &[PathBuf], options: &SortOptions, ctx: &OutputContext) -> RunResult {
    let progress = ProgressReporter::new(paths.len() as u64, ctx.show_progress);

    let outcomes = process_all(paths, options.check_only, |outcome| {
        match outcome {
            Ok(report) => {
                if let Some(line) = output::format_report(report, ctx) {
                    progress.suspend(|| println!("{line}"));
                }
                progress.file_done(&file_label(&report.path));
            }
            Err(error) => {
                tracing::debug!(stage = error.stage(), path = %error.path().display(), "pipeline failed");
                let message = output::format_failure(error, &ctx.colors);
                progress.suspend(|| eprintln!("{message}"));
                progress.file_done(&file_label(error.path()));
            }
        }
    });

    progress.finish();

    let mut result = RunResult::default();
    for outcome in &outcomes {
        match outcome {
            Ok(report) => result.record(report.status),
            Err(_) => result.failures += 1,
        }
    }

    if let Some(summary) = output::format_summary(&result, options, ctx) {
        println!();
        println!("{summary}");
    }

    result
}
