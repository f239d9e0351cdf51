//! Exit code constants for the gobuild CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config, missing source)
//! - 2: Build failure (toolchain could not start or exited non-zero)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// Build failure: the toolchain could not be started or exited non-zero.
pub const BUILD_FAILURE: i32 = 2;
