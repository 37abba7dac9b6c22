//! Registry Sanity CLI
//!
//! A command-line tool for checking the consistency of a community's
//! repository registries.

use clap::Parser;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode as StdExitCode;
use tracing::{Level, debug, error, info};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Args;
use cli::config::{ExitCode, ValidatedConfig};
use cli::git::GitSnapshotProvider;
use cli::output::{HumanOutput, JsonOutput};
use registry_sanity_core::model::OwnersFileDirectory;
use registry_sanity_core::validate::SanityRunner;

fn main() -> StdExitCode {
    // Parse command-line arguments
    let args = Args::parse();

    // Initialize tracing
    init_tracing(args.verbose, args.json);

    let exit_code = run(args);
    StdExitCode::from(i32::from(exit_code) as u8)
}

/// Initialize tracing based on verbosity level.
fn init_tracing(verbosity: u8, json_output: bool) {
    // Don't output logs when using JSON output mode
    if json_output {
        return;
    }

    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

/// Run the checker with the given arguments.
fn run(args: Args) -> ExitCode {
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();

    // Validate configuration
    let config = match ValidatedConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            let use_colors = !args.json && io::stderr().is_terminal();
            write_error(&mut stderr, &e.to_string(), use_colors);
            return ExitCode::StartupFailure;
        }
    };

    let use_colors = !config.json_output && io::stdout().is_terminal();

    debug!("Validated configuration: {:?}", config);
    info!("Community path: {}", config.community_path.display());
    if !config.run_options.skip_changes {
        info!("Previous revision: {}", config.run_options.previous_revision);
    }

    let loader = config.loader();
    let snapshots = GitSnapshotProvider::new(&config.community_path);
    let maintainers = OwnersFileDirectory::new(&config.community_path, config.paths.clone());
    let report = SanityRunner::new(config.run_options.clone()).run(&loader, &snapshots, &maintainers);

    // Output results
    let written = if config.json_output {
        JsonOutput::new(&report).write(&mut stdout)
    } else {
        HumanOutput::new(&mut stdout, use_colors).write_report(&report)
    };
    if let Err(e) = written {
        error!("Failed to write output: {}", e);
        return ExitCode::StartupFailure;
    }

    // Determine exit code
    if let Some(fatal) = &report.fatal {
        error!("Stopped: {}", fatal);
        return ExitCode::StartupFailure;
    }
    info!("Found {} error(s)", report.error_count());
    ExitCode::for_error_count(report.error_count())
}

/// Write an error message to the writer.
fn write_error<W: Write>(writer: &mut W, message: &str, use_colors: bool) {
    if use_colors {
        let _ = writeln!(writer, "\x1b[1;31mError:\x1b[0m {}", message);
    } else {
        let _ = writeln!(writer, "Error: {}", message);
    }
}
