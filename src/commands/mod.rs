//! Command implementations for gobuild.
//!
//! This module acts as the host side of the plugin contract: it decodes the
//! configuration, hands it to the [`Builder`], calls the build function with
//! an explicit context and reporter, and serializes the result.


use crate::builder::{Binary, Builder};
use crate::cli::{BuildArgs, Command, ConfigArgs, ConfigSource, ValidateArgs};
use crate::config::{BuildConfig, ConfigSchema};
use crate::context::BuildContext;
use crate::error::{GobuildError, Result};
use crate::toolchain::Toolchain;
use crate::ui::{TerminalUi, Ui};
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

/// Config file read when `--config` is not given, if it exists.
pub const DEFAULT_CONFIG_FILE: &str = "gobuild.yaml";

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Config(args) => cmd_config(args),
        Command::Validate(args) => cmd_validate(args),
        Command::Build(args) => cmd_build(args),
    }
}

fn cmd_config(args: ConfigArgs) -> Result<()> {
    let mut stdout = io::stdout().lock();
    write_config(&args, &mut stdout)
}

/// Render the schema, or the effective config as YAML, to `out`.
fn write_config(args: &ConfigArgs, out: &mut dyn Write) -> Result<()> {
    let rendered = if args.schema {
        ConfigSchema::build().to_string()
    } else {
        let mut config = load_config(&args.input)?;
        config.apply_defaults();
        config.to_yaml()?
    };

    out.write_all(rendered.as_bytes())
        .map_err(|e| GobuildError::UserError(format!("failed to write config: {}", e)))
}

fn cmd_validate(args: ValidateArgs) -> Result<()> {
    let config = load_config(&args.input)?;
    let mut builder = Builder::default();
    builder.config_set(config)?;

    println!("Configuration is valid.");
    Ok(())
}

fn cmd_build(args: BuildArgs) -> Result<()> {
    let config = load_config(&args.input)?;
    let toolchain = match args.toolchain.as_deref() {
        Some(command) => Toolchain::parse(command)?,
        None => Toolchain::default(),
    };
    let ctx = BuildContext::resolve()?;

    let binary = run_build(config, toolchain, &ctx, &TerminalUi)?;

    let json = binary.to_json().map_err(|e| {
        GobuildError::UserError(format!("failed to serialize build result: {}", e))
    })?;
    println!("{}", json);
    Ok(())
}

/// Validate `config`, then build it.
///
/// A configuration error returns before the reporter or the toolchain is
/// touched.
pub fn run_build(
    config: BuildConfig,
    toolchain: Toolchain,
    ctx: &BuildContext,
    ui: &dyn Ui,
) -> Result<Binary> {
    let mut builder = Builder::default().with_toolchain(toolchain);
    builder.config_set(config)?;

    let build = builder.build_func();
    build(&mut builder, ctx, ui)
}

/// Read the config document and apply command-line overrides.
fn load_config(input: &ConfigSource) -> Result<BuildConfig> {
    let mut config = match &input.config {
        Some(path) => BuildConfig::load(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            debug!(path = DEFAULT_CONFIG_FILE, "loading default config file");
            BuildConfig::load(DEFAULT_CONFIG_FILE)?
        }
        None => BuildConfig::default(),
    };

    if let Some(source) = &input.source {
        config.source = source.clone();
    }
    if let Some(output_name) = &input.output_name {
        config.output_name = output_name.clone();
    }

    Ok(config)
}
