//! # Archive Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This file serves as the main entry point for the `archive` CLI.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Watching for Ctrl-C while the blocking work runs on a worker thread
//! - Turning errors into the documented exit statuses
//!
//! ## Exit Statuses
//!
//! | Status | Meaning                                                   |
//! |--------|-----------------------------------------------------------|
//! | 0      | Every source was processed                                |
//! | 1      | The run was interrupted (`Operation interrupted.`)        |
//! | 2      | A user error such as an unknown file type (`error: ...`)  |
//!
//! Errors that are not `ArchiveError`s are returned from `main` and printed
//! with their full context chain.
//!
//! ## Examples
//!
//! ```bash
//! # Archive a folder next to itself
//! archive photos
//!
//! # Extract with debug logging
//! archive -v -e photos.zip
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Mode handling for the command line
mod common; // Archive logic, filesystem helpers, external tools
mod core; // Configuration and errors

use crate::common::process;
use crate::core::error::{ArchiveError, EXIT_INTERRUPTED};

/// Defines the command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "archive",
    about = "Toggle files and folders between their archived and extracted forms",
    long_about = "Archives each SOURCE into SOURCE.zip and moves the original to the trash.\n\
                  With -e, extracts zip, jar, tar, tar.gz, tgz and disk image containers instead.\n\
                  With --fs-compress, applies filesystem compression to each SOURCE in place.",
    version
)]
struct Cli {
    #[command(flatten)]
    toggle: commands::toggle::ToggleArgs,

    /// Increase logging verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn log_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "warn";
    }
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

fn init_logging(level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(log_level(cli.verbose, cli.quiet));

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    // Ctrl-C only records the interruption; the running tool gets SIGINT itself.
    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            process::mark_interrupted();
        }
    });

    // All work is blocking, so keep it off the async runtime.
    let toggle = cli.toggle;
    let command_result =
        tokio::task::spawn_blocking(move || commands::toggle::handle_toggle(toggle)).await?;

    if process::was_interrupted() {
        eprintln!("Operation interrupted.");
        std::process::exit(EXIT_INTERRUPTED);
    }

    if let Err(e) = command_result {
        tracing::debug!("Command execution failed: {:?}", e);
        if let Some(archive_error) = e.downcast_ref::<ArchiveError>() {
            eprintln!("error: {}", archive_error);
            std::process::exit(archive_error.exit_code());
        }
        return Err(e);
    }

    Ok(())
}
