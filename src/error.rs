//! Error types for gobuild.
//!
//! Two kinds of failure reach the host: configuration errors, which stop
//! before the toolchain is touched, and build failures, which are the
//! toolchain's own error passed through unchanged.

use crate::exit_codes;
use std::io;
use std::process::ExitStatus;
use thiserror::Error;

/// Main error type for gobuild operations.
#[derive(Error, Debug)]
pub enum GobuildError {
    /// The configured source path could not be stat'ed.
    ///
    /// Not-found, permission errors and dangling symlinks all land here; the
    /// underlying I/O error is kept as the source.
    #[error("source folder does not exist")]
    SourceMissing {
        path: String,
        #[source]
        cause: io::Error,
    },

    /// The configuration document could not be read or decoded.
    #[error("{0}")]
    Config(String),

    /// User provided invalid arguments or the environment is unusable.
    #[error("{0}")]
    UserError(String),

    /// The toolchain could not be started.
    #[error(transparent)]
    Spawn(io::Error),

    /// The toolchain ran and exited non-zero.
    #[error("{0}")]
    Failed(ExitStatus),
}

impl GobuildError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            GobuildError::SourceMissing { .. } => exit_codes::USER_ERROR,
            GobuildError::Config(_) => exit_codes::USER_ERROR,
            GobuildError::UserError(_) => exit_codes::USER_ERROR,
            GobuildError::Spawn(_) => exit_codes::BUILD_FAILURE,
            GobuildError::Failed(_) => exit_codes::BUILD_FAILURE,
        }
    }

    /// Whether this error came from configuration rather than the build itself.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            GobuildError::SourceMissing { .. } | GobuildError::Config(_)
        )
    }
}

/// Result type alias for gobuild operations.
pub type Result<T> = std::result::Result<T, GobuildError>;
