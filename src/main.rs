use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use inisort::logging::init_logging;
use inisort::{
    detect_colors, find_config_file, generate_init_file, load_config, merge_run_config, run,
    CliRunOptions, InisortToml, OutputContext, OutputMode, RunConfig, SortOptions,
};
use tracing::{info, warn};

const EXIT_STATUS_HELP: &str = "\
Exit status:
  0  every file was sorted (or, with --check, is already sorted)
  1  a file could not be read, sorted or written, or --check found an unsorted file

Without PATHS the default file (./test.ini) is processed and the exit status
reflects that file alone. On failure inisort waits for Enter before exiting
unless --no-pause is given.";

#[derive(Parser)]
#[command(name = "inisort")]
#[command(version, about = "Sort INI sections and entries in place, keeping comments attached")]
#[command(after_help = EXIT_STATUS_HELP)]
struct Cli {
    /// INI files to sort (default: ./test.ini)
    paths: Vec<PathBuf>,

    /// Check only (no modifications), exit 1 if a file is not sorted
    #[arg(short, long)]
    check: bool,

    /// Show changes in diff format
    #[arg(short, long)]
    diff: bool,

    /// Output only changed file names
    #[arg(short, long)]
    quiet: bool,

    /// Exit immediately on failure instead of waiting for Enter
    #[arg(long)]
    no_pause: bool,

    /// Number of worker threads
    #[arg(short, long, value_name = "N")]
    jobs: Option<usize>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Generate a template inisort.toml configuration file
    #[arg(long, conflicts_with = "paths")]
    init: bool,

    /// Specify config file path (overrides auto-discovery)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.init {
        return handle_init();
    }

    let toml_config = load_configuration(&cli.config);
    let cli_options = CliRunOptions {
        no_pause: cli.no_pause.then_some(true),
        jobs: cli.jobs,
    };
    let run_config = merge_run_config(&cli_options, toml_config.as_ref().map(|c| &c.run));

    configure_thread_pool(&run_config);

    let colors = detect_colors();
    let paths = if cli.paths.is_empty() {
        println!("{}", colors.paint(colors.notice, "No paths provided!"));
        println!("Attempting to load: {}", run_config.default_path.display());
        println!();
        vec![run_config.default_path.clone()]
    } else {
        cli.paths.clone()
    };

    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.diff {
        OutputMode::Diff
    } else {
        OutputMode::Normal
    };

    let options = SortOptions {
        check_only: cli.check,
        output_mode,
    };
    let ctx = OutputContext::new(
        output_mode,
        colors,
        cli.verbose > 0,
        output_mode == OutputMode::Normal && io::stderr().is_terminal(),
    );

    let result = run(&paths, &options, &ctx);

    if !result.all_succeeded() {
        if run_config.pause_on_failure {
            pause();
        }
        return ExitCode::from(1);
    }
    if options.check_only && result.has_problems() {
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn handle_init() -> ExitCode {
    match generate_init_file() {
        Ok(path) => {
            println!("Created {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

fn load_configuration(explicit_path: &Option<PathBuf>) -> Option<InisortToml> {
    let config_path = explicit_path.clone().or_else(|| {
        std::env::current_dir()
            .ok()
            .and_then(|d| find_config_file(&d))
    });

    config_path.and_then(|p| match load_config(&p) {
        Ok(config) => {
            info!(path = %p.display(), "using config");
            Some(config)
        }
        Err(e) => {
            warn!("failed to load {}: {e}", p.display());
            None
        }
    })
}

fn configure_thread_pool(config: &RunConfig) {
    if let Some(jobs) = config.jobs {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
        {
            warn!("failed to configure thread pool: {e}");
        }
    }
}

/// Wait for the user to acknowledge the failures. EOF returns at once.
fn pause() {
    eprint!("...");
    let _ = io::stderr().flush();
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
}
