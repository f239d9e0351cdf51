//! CLI argument parsing for gobuild.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Gobuild: build a Go package and report the binary to the deployment host.
///
/// Reads build options from a YAML document (default: `gobuild.yaml` if
/// present), runs `go build -o <output_name> <source>`, and prints the
/// resulting binary descriptor as JSON.
#[derive(Parser, Debug)]
#[command(name = "gobuild")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available commands for gobuild.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the effective build configuration.
    ///
    /// With `--schema`, lists the recognized options instead.
    Config(ConfigArgs),

    /// Check the build configuration without building.
    ///
    /// Fails if the source path does not exist.
    Validate(ValidateArgs),

    /// Build the package and print the binary descriptor.
    ///
    /// Validates the configuration, runs the toolchain once, and writes
    /// `{"location": ...}` to stdout on success.
    Build(BuildArgs),
}

/// Options shared by every command that reads a build configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigSource {
    /// Path to the YAML config file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Package path to build (overrides the config file).
    #[arg(long)]
    pub source: Option<String>,

    /// Name of the binary to produce (overrides the config file).
    #[arg(long)]
    pub output_name: Option<String>,
}

/// Arguments for the `config` command.
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub input: ConfigSource,

    /// List recognized options, their types and defaults.
    #[arg(long)]
    pub schema: bool,
}

/// Arguments for the `validate` command.
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub input: ConfigSource,
}

/// Arguments for the `build` command.
#[derive(Parser, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub input: ConfigSource,

    /// Toolchain command to run instead of `go`.
    #[arg(long, value_name = "CMD")]
    pub toolchain: Option<String>,
}
