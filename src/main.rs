//! Gobuild: builder plugin that runs the Go toolchain and reports the built
//! binary to the deployment host.
//!
//! This is the main entry point for the `gobuild` CLI. It sets up logging,
//! parses arguments, dispatches to the command handler, and maps errors to
//! exit codes.

mod cli;
mod commands;
pub mod builder;
pub mod config;
pub mod context;
pub mod error;
pub mod exit_codes;
pub mod toolchain;
pub mod ui;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::error::Error as _;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    init_logging(cli.verbose);

    match commands::dispatch(cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            let mut cause = err.source();
            while let Some(inner) = cause {
                eprintln!("  caused by: {}", inner);
                cause = inner.source();
            }
            if err.is_config_error() {
                eprintln!("\nRun `gobuild config --schema` to list the recognized options.");
            }

            ExitCode::from(err.exit_code() as u8)
        }
    }
}

/// Log to stderr. `RUST_LOG` wins; otherwise `-v` selects debug and the
/// default is warnings only, so progress output stays readable.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "gobuild=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
