//! Explicit option schema for the build configuration.
//!
//! The host hands the plugin a declarative key/value document. Instead of
//! binding it to [`BuildConfig`] by field tags, every recognized option is
//! listed here with its type, default and validation rule, and [`ConfigSchema::decode`]
//! walks the document against that list.

use super::model::{BuildConfig, DEFAULT_OUTPUT_NAME, DEFAULT_SOURCE};
use crate::error::{GobuildError, Result};
use serde_yaml::Value;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Value type accepted for an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    String,
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKind::String => f.pad("string"),
        }
    }
}

/// Check applied to an option's effective value during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionRule {
    /// No constraint.
    None,
    /// The value must name a path that can be stat'ed.
    PathExists,
}

/// One recognized configuration option.
#[derive(Debug, Clone, Copy)]
pub struct OptionSpec {
    pub name: &'static str,
    pub kind: OptionKind,
    pub default: &'static str,
    pub rule: OptionRule,
    pub description: &'static str,
    get: fn(&BuildConfig) -> &str,
    set: fn(&mut BuildConfig, String),
}

impl OptionSpec {
    /// The option's value in `config` with its default substituted when empty.
    pub fn effective<'a>(&self, config: &'a BuildConfig) -> &'a str {
        let value = (self.get)(config);
        if value.is_empty() { self.default } else { value }
    }

    fn check(&self, config: &BuildConfig, base: &Path) -> Result<()> {
        match self.rule {
            OptionRule::None => Ok(()),
            OptionRule::PathExists => {
                let path = self.effective(config);
                let resolved = base.join(path);
                debug!(option = self.name, path = %resolved.display(), "checking path exists");
                std::fs::metadata(&resolved)
                    .map(|_| ())
                    .map_err(|cause| GobuildError::SourceMissing {
                        path: resolved.to_string_lossy().into_owned(),
                        cause,
                    })
            }
        }
    }
}

fn get_output_name(config: &BuildConfig) -> &str {
    &config.output_name
}

fn set_output_name(config: &mut BuildConfig, value: String) {
    config.output_name = value;
}

fn get_source(config: &BuildConfig) -> &str {
    &config.source
}

fn set_source(config: &mut BuildConfig, value: String) {
    config.source = value;
}

const BUILD_OPTIONS: &[OptionSpec] = &[
    OptionSpec {
        name: "output_name",
        kind: OptionKind::String,
        default: DEFAULT_OUTPUT_NAME,
        rule: OptionRule::None,
        description: "Name of the binary written by the toolchain",
        get: get_output_name,
        set: set_output_name,
    },
    OptionSpec {
        name: "source",
        kind: OptionKind::String,
        default: DEFAULT_SOURCE,
        rule: OptionRule::PathExists,
        description: "Package path to build; must exist",
        get: get_source,
        set: set_source,
    },
];

/// The set of options a [`BuildConfig`] is decoded from.
#[derive(Debug, Clone, Copy)]
pub struct ConfigSchema {
    options: &'static [OptionSpec],
}

impl Default for ConfigSchema {
    fn default() -> Self {
        Self::build()
    }
}

impl ConfigSchema {
    /// Schema for the build step.
    pub fn build() -> Self {
        Self {
            options: BUILD_OPTIONS,
        }
    }

    pub fn options(&self) -> &'static [OptionSpec] {
        self.options
    }

    pub fn get(&self, name: &str) -> Option<&'static OptionSpec> {
        self.options.iter().find(|o| o.name == name)
    }

    fn option_names(&self) -> String {
        self.options
            .iter()
            .map(|o| o.name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Decode a key/value document into a [`BuildConfig`].
    ///
    /// A null document is treated as an empty mapping. Unknown keys and
    /// values of the wrong type are rejected; null values leave the option
    /// unset.
    pub fn decode(&self, document: &Value) -> Result<BuildConfig> {
        let mapping = match document {
            Value::Null => return Ok(BuildConfig::default()),
            Value::Mapping(mapping) => mapping,
            other => {
                return Err(GobuildError::Config(format!(
                    "config must be a mapping of options, got {}",
                    value_kind(other)
                )));
            }
        };

        let mut config = BuildConfig::default();

        for (key, value) in mapping {
            let Value::String(key) = key else {
                return Err(GobuildError::Config(format!(
                    "config keys must be strings, got {}",
                    value_kind(key)
                )));
            };

            let spec = self.get(key).ok_or_else(|| {
                GobuildError::Config(format!(
                    "unknown option '{}' (expected one of: {})",
                    key,
                    self.option_names()
                ))
            })?;

            match (spec.kind, value) {
                (_, Value::Null) => {}
                (OptionKind::String, Value::String(s)) => (spec.set)(&mut config, s.clone()),
                (kind, other) => {
                    return Err(GobuildError::Config(format!(
                        "option '{}' must be a {}, got {}",
                        spec.name,
                        kind,
                        value_kind(other)
                    )));
                }
            }
        }

        Ok(config)
    }

    /// Run every option's validation rule against `config`, resolving
    /// relative paths against the process working directory.
    pub fn validate(&self, config: &BuildConfig) -> Result<()> {
        self.validate_in(config, Path::new(""))
    }

    /// Run every option's validation rule, resolving relative paths
    /// against `base`. Absolute paths are checked as they are.
    ///
    /// Stops at the first failing option.
    pub fn validate_in(&self, config: &BuildConfig, base: &Path) -> Result<()> {
        for spec in self.options {
            spec.check(config, base)?;
        }
        Ok(())
    }
}

impl fmt::Display for ConfigSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for spec in self.options {
            writeln!(
                f,
                "{:<12} {:<7} default {:<8} {}",
                spec.name,
                spec.kind,
                format!("\"{}\"", spec.default),
                spec.description
            )?;
        }
        Ok(())
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
