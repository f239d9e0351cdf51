//! Toolchain invocation.
//!
//! Runs `<toolchain> build -o <output_name> <source>` as a single blocking
//! subprocess. The toolchain command is parsed with shell-words so it can
//! carry a wrapper or prefix arguments (`env CGO_ENABLED=0 go`), and is
//! executed without a shell.

use crate::error::{GobuildError, Result};
use std::path::Path;
use std::process::{Command, ExitStatus};
use tracing::{debug, info};

/// Toolchain program used when none is configured.
pub const DEFAULT_TOOLCHAIN: &str = "go";

/// Maximum number of output lines attached to a failure report.
const FAILURE_OUTPUT_MAX_LINES: usize = 50;

/// Maximum total characters attached to a failure report.
const FAILURE_OUTPUT_MAX_CHARS: usize = 4096;

/// The external build command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    program: String,
    prefix_args: Vec<String>,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            program: DEFAULT_TOOLCHAIN.to_string(),
            prefix_args: Vec::new(),
        }
    }
}

/// Captured result of a toolchain run that started successfully.
#[derive(Debug)]
pub struct BuildOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl BuildOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Tail of stdout and stderr, trimmed for display in a failure step.
    pub fn tail(&self) -> String {
        let combined = if !self.stderr.is_empty() {
            format!("{}\n{}", self.stdout, self.stderr)
        } else {
            self.stdout.clone()
        };

        truncate_output(
            combined.trim(),
            FAILURE_OUTPUT_MAX_LINES,
            FAILURE_OUTPUT_MAX_CHARS,
        )
    }
}

impl Toolchain {
    /// Parse a toolchain command string.
    ///
    /// The first word is the program; any further words are passed before
    /// the `build` subcommand.
    pub fn parse(command: &str) -> Result<Self> {
        let mut words = shell_words::split(command).map_err(|e| {
            GobuildError::UserError(format!(
                "failed to parse toolchain '{}': {}\n\n\
                 Fix: check for unmatched quotes or invalid escape sequences.",
                command, e
            ))
        })?;

        if words.is_empty() {
            return Err(GobuildError::UserError(
                "toolchain is empty after parsing.\n\n\
                 Fix: provide a program name such as 'go'."
                    .to_string(),
            ));
        }

        let program = words.remove(0);
        Ok(Self {
            program,
            prefix_args: words,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the program for one build.
    pub fn build_args(&self, output_name: &str, source: &str) -> Vec<String> {
        let mut args = self.prefix_args.clone();
        args.extend(
            ["build", "-o", output_name, source]
                .iter()
                .map(|s| s.to_string()),
        );
        args
    }

    /// The full command line, quoted for logs.
    pub fn command_line(&self, output_name: &str, source: &str) -> String {
        let mut words = vec![self.program.clone()];
        words.extend(self.build_args(output_name, source));
        shell_words::join(words)
    }

    /// Run the build in `working_dir` and wait for it to exit.
    ///
    /// Returns `Err(GobuildError::Spawn)` only when the process could not be
    /// started; a non-zero exit is reported through [`BuildOutput::status`].
    pub fn run_build(
        &self,
        output_name: &str,
        source: &str,
        working_dir: &Path,
    ) -> Result<BuildOutput> {
        info!(
            command = %self.command_line(output_name, source),
            working_dir = %working_dir.display(),
            "invoking toolchain"
        );

        let output = Command::new(&self.program)
            .args(self.build_args(output_name, source))
            .current_dir(working_dir)
            .output()
            .map_err(GobuildError::Spawn)?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        debug!(status = %output.status, "toolchain exited");
        if !stderr.is_empty() {
            debug!(stderr = %stderr, "toolchain stderr");
        }

        Ok(BuildOutput {
            status: output.status,
            stdout,
            stderr,
        })
    }
}

/// Keep the last `max_lines` lines, then the last `max_chars` characters.
fn truncate_output(output: &str, max_lines: usize, max_chars: usize) -> String {
    let lines: Vec<&str> = output.lines().collect();

    // Errors are usually at the end.
    let relevant_lines: Vec<&str> = if lines.len() > max_lines {
        lines[lines.len() - max_lines..].to_vec()
    } else {
        lines
    };

    let mut result = relevant_lines.join("\n");

    if result.len() > max_chars {
        let mut start = result.len() - max_chars;
        while !result.is_char_boundary(start) {
            start += 1;
        }
        result = format!("...(truncated)...\n{}", &result[start..]);
    }

    result
}
