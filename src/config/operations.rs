//! Config loading and serialization.

use super::model::BuildConfig;
use super::schema::ConfigSchema;
use crate::error::{GobuildError, Result};
use std::path::Path;

impl BuildConfig {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(BuildConfig)` - Successfully decoded config (not yet validated)
    /// * `Err(GobuildError::Config)` - Read, parse or decode failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            GobuildError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Decode config from a YAML string against the build schema.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let document: serde_yaml::Value = serde_yaml::from_str(yaml)
            .map_err(|e| GobuildError::Config(format!("failed to parse config YAML: {}", e)))?;

        ConfigSchema::build().decode(&document)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| GobuildError::Config(format!("failed to serialize config to YAML: {}", e)))
    }

    /// Check the config against the build schema's rules.
    pub fn validate(&self) -> Result<()> {
        ConfigSchema::build().validate(self)
    }

    /// Check the config with relative paths resolved against `base`.
    pub fn validate_in(&self, base: &Path) -> Result<()> {
        ConfigSchema::build().validate_in(self, base)
    }
}
