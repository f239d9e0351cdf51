//! Configuration for the build step.
//!
//! The host supplies options as a declarative document (YAML when driven
//! from the CLI). Decoding goes through an explicit schema so unknown
//! options and mistyped values are caught before anything runs.

mod model;
mod operations;
pub mod schema;


pub use model::{BuildConfig, DEFAULT_OUTPUT_NAME, DEFAULT_SOURCE};
pub use schema::{ConfigSchema, OptionKind, OptionRule, OptionSpec};
