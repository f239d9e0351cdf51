//! Build configuration model.

use serde::Serialize;

/// Output name used when `output_name` is unset or empty.
pub const DEFAULT_OUTPUT_NAME: &str = "app";

/// Source path used when `source` is unset or empty.
pub const DEFAULT_SOURCE: &str = "./";

/// Configuration for a single build.
///
/// Both fields are optional in the host document. An empty string means
/// "unset"; defaults are applied when the config is validated or built, not
/// when it is decoded, so the stored value always reflects what the host sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildConfig {
    /// Name of the binary the toolchain writes (default: "app").
    pub output_name: String,

    /// Package path handed to the toolchain (default: "./").
    pub source: String,
}

impl BuildConfig {
    pub fn new(output_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            output_name: output_name.into(),
            source: source.into(),
        }
    }

    /// `output_name` with the default substituted for an empty value.
    pub fn effective_output_name(&self) -> &str {
        if self.output_name.is_empty() {
            DEFAULT_OUTPUT_NAME
        } else {
            &self.output_name
        }
    }

    /// `source` with the default substituted for an empty value.
    pub fn effective_source(&self) -> &str {
        if self.source.is_empty() {
            DEFAULT_SOURCE
        } else {
            &self.source
        }
    }

    /// Fill every empty field with its default.
    pub fn apply_defaults(&mut self) {
        if self.output_name.is_empty() {
            self.output_name = DEFAULT_OUTPUT_NAME.to_string();
        }
        if self.source.is_empty() {
            self.source = DEFAULT_SOURCE.to_string();
        }
    }
}
