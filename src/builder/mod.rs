//! The builder component.
//!
//! Holds one [`BuildConfig`], validates it, and turns it into a single
//! toolchain invocation. A successful build yields a [`Binary`] for the host
//! to pass to later pipeline stages.
//!
//! # Build Steps
//!
//! 1. Open a status on the host's reporter
//! 2. Fill defaults for `output_name` and `source`
//! 3. Check `source` exists under the build directory
//! 4. Run `<toolchain> build -o <output_name> <source>`
//! 5. Report success or failure as a step
//! 6. Close the status (on every path)

mod binary;

#[cfg(test)]
mod tests;

use crate::config::BuildConfig;
use crate::context::BuildContext;
use crate::error::{GobuildError, Result};
use crate::toolchain::Toolchain;
use crate::ui::{StatusGuard, StepStatus, Ui};
use tracing::{debug, info};

pub use binary::{Binary, join_location};

/// Signature of the build entry point handed to the host.
pub type BuildFunc = fn(&mut Builder, &BuildContext, &dyn Ui) -> Result<Binary>;

/// Runs the toolchain for one configured package.
#[derive(Debug, Clone, Default)]
pub struct Builder {
    config: BuildConfig,
    toolchain: Toolchain,
}

impl Builder {
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            toolchain: Toolchain::default(),
        }
    }

    /// Replace the toolchain command (default: `go`).
    pub fn with_toolchain(mut self, toolchain: Toolchain) -> Self {
        self.toolchain = toolchain;
        self
    }

    /// Current configuration, as decoded from the host.
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    /// Validate `config` and adopt it.
    ///
    /// On error the previous configuration is kept.
    pub fn config_set(&mut self, config: BuildConfig) -> Result<()> {
        validate(&config)?;
        self.config = config;
        Ok(())
    }

    /// The build entry point as an explicitly typed function.
    pub fn build_func(&self) -> BuildFunc {
        Builder::build
    }

    /// Run the toolchain once and describe the artifact it produced.
    ///
    /// `source` is checked again relative to `ctx.working_dir` before the
    /// toolchain starts; a miss returns [`GobuildError::SourceMissing`].
    /// Toolchain errors are returned unchanged: [`GobuildError::Spawn`] when
    /// the program cannot start, [`GobuildError::Failed`] on a non-zero exit.
    /// The status opened on `ui` is closed before this returns, whatever the
    /// outcome.
    pub fn build(&mut self, ctx: &BuildContext, ui: &dyn Ui) -> Result<Binary> {
        let mut status = StatusGuard::new(ui.status());
        status.update("Building application");

        self.config.apply_defaults();

        // The toolchain runs in the context's directory, which need not be
        // the directory `config_set` validated against.
        if let Err(err) = self.config.validate_in(&ctx.working_dir) {
            info!(error = %err, "source missing in build directory");
            status.step(StepStatus::Error, "source folder does not exist");
            return Err(err);
        }

        let output_name = self.config.output_name.as_str();
        let source = self.config.source.as_str();

        let output = match self.toolchain.run_build(output_name, source, &ctx.working_dir) {
            Ok(output) => output,
            Err(err) => {
                info!(error = %err, "toolchain could not be started");
                status.step(StepStatus::Error, "build failed");
                return Err(err);
            }
        };

        if !output.success() {
            info!(status = %output.status, "build failed");
            let tail = output.tail();
            let msg = if tail.is_empty() {
                "build failed".to_string()
            } else {
                format!("build failed\n{}", tail)
            };
            status.step(StepStatus::Error, &msg);
            return Err(GobuildError::Failed(output.status));
        }

        status.step(StepStatus::Ok, "Application build successfully");

        let binary = Binary {
            location: join_location(source, output_name),
        };
        info!(location = %binary.location, "build succeeded");
        Ok(binary)
    }
}

/// Check a configuration before any build is attempted.
///
/// `source` (after defaulting to `./`) must be stat-able. Every stat failure
/// is reported as [`GobuildError::SourceMissing`]; the I/O error is kept as
/// its source. `output_name` is not checked.
pub fn validate(config: &BuildConfig) -> Result<()> {
    debug!(source = config.effective_source(), "validating build config");
    config.validate()
}
