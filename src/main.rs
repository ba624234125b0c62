//! fiend - a restricted find(1)
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use fiend::config::{CliArgs, WalkConfig};
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use tracing::{error_span, warn};
use tracing_subscriber::EnvFilter;

/// Name used to prefix every diagnostic
const TOOL_NAME: &str = "fiend";

fn main() -> ExitCode {
    setup_logging();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {:#}", TOOL_NAME, e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Validate, compile the expression and stat -newer references
    let config = WalkConfig::from_args(args).context("invalid command line")?;

    // Every diagnostic below carries the tool name; ERROR level so that no
    // filter disables the span
    let _span = error_span!(TOOL_NAME).entered();

    if let Some(first) = config.ignored.first() {
        warn!(
            "ignoring {} unrecognized token(s) starting at `{}'",
            config.ignored.len(),
            first
        );
    }

    let stdout = io::stdout().lock();
    fiend::run(&config, io::BufWriter::new(stdout)).context("cannot write output")?;

    Ok(())
}

fn setup_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fiend=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .without_time()
        .with_level(false)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
