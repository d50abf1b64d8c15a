//! Config loading, validation, and utility operations.

use super::model::Config;
use super::types::CONFIG_FILE_NAME;
use crate::error::{AntrunError, Result};
use crate::runner::RunOptions;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            AntrunError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load `antrun.yaml` from `dir`, or defaults when there is none.
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let path = dir.as_ref().join(CONFIG_FILE_NAME);
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        debug!(path = %path.display(), "loading config");
        Self::load(path)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not an empty mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| AntrunError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `timeout_seconds` must be positive when set
    /// - `gant_command` must not be blank
    /// - `project_file` must not be blank
    pub fn validate(&self) -> Result<()> {
        if self.timeout_seconds == Some(0) {
            return Err(AntrunError::UserError(
                "config validation failed: timeout_seconds must be greater than 0 (omit it to wait indefinitely)"
                    .to_string(),
            ));
        }

        if self.gant_command.trim().is_empty() {
            return Err(AntrunError::UserError(
                "config validation failed: gant_command must not be empty".to_string(),
            ));
        }

        if self.project_file.trim().is_empty() {
            return Err(AntrunError::UserError(
                "config validation failed: project_file must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Effective timeout as a `Duration`.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    /// Runner options derived from this config.
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            timeout: self.timeout(),
            stderr: self.stderr,
            current_dir: None,
            environment: self.environment.clone(),
        }
    }
}
