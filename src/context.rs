//! Build context handed to the build function.
//!
//! The host used to inject whatever parameters a build function asked for.
//! Here the build receives this context explicitly alongside the progress
//! reporter.

use crate::error::{GobuildError, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Environment for one build invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    /// Directory the toolchain runs in. Relative `source` and `output_name`
    /// values resolve against it, and the build re-checks `source` here.
    pub working_dir: PathBuf,
}

impl BuildContext {
    /// Context for the current process working directory.
    ///
    /// # Returns
    ///
    /// * `Ok(BuildContext)` - Resolved context
    /// * `Err(GobuildError::UserError)` - Working directory is unavailable
    pub fn resolve() -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            GobuildError::UserError(format!("failed to get current working directory: {}", e))
        })?;

        Ok(Self::in_dir(cwd))
    }

    /// Context rooted at a specific directory.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            working_dir: dir.as_ref().to_path_buf(),
        }
    }
}
