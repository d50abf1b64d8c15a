//! Loading and validating a project file.

use super::model::{ProjectFile, Target};
use crate::error::{AntrunError, Result};
use std::path::{Path, PathBuf};

/// A validated project together with the directory its relative paths
/// resolve against.
#[derive(Debug, Clone)]
pub struct Project {
    file: ProjectFile,
    base_dir: PathBuf,
}

impl Project {
    /// Load a project file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            AntrunError::UserError(format!(
                "failed to read project file '{}': {}\n\
                 Fix: pass the project file with -f or set project_file in antrun.yaml.",
                path.display(),
                e
            ))
        })?;

        let base_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        Self::from_yaml(&content, base_dir).map_err(|e| match e {
            AntrunError::UserError(msg) => {
                AntrunError::UserError(format!("{} (in '{}')", msg, path.display()))
            }
            other => other,
        })
    }

    /// Parse a project from YAML, resolving relative paths against `base_dir`.
    pub fn from_yaml(yaml: &str, base_dir: impl Into<PathBuf>) -> Result<Self> {
        let file: ProjectFile = serde_yaml::from_str(yaml).map_err(|e| {
            AntrunError::UserError(format!("failed to parse project YAML: {}", e))
        })?;

        let project = Self {
            file,
            base_dir: base_dir.into(),
        };
        project.validate()?;
        Ok(project)
    }

    /// Validation rules:
    /// - `name` must not be blank
    /// - target names must not be blank
    /// - `default`, when set, must name a defined target
    fn validate(&self) -> Result<()> {
        if self.file.name.trim().is_empty() {
            return Err(AntrunError::UserError(
                "project validation failed: name must not be empty".to_string(),
            ));
        }

        if self.file.targets.keys().any(|name| name.trim().is_empty()) {
            return Err(AntrunError::UserError(
                "project validation failed: target names must not be empty".to_string(),
            ));
        }

        if let Some(default) = &self.file.default
            && !self.file.targets.contains_key(default)
        {
            return Err(AntrunError::UserError(format!(
                "project validation failed: default target '{}' is not defined in targets",
                default
            )));
        }

        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.file.name
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn default_target(&self) -> Option<&str> {
        self.file.default.as_deref()
    }

    pub fn target(&self, name: &str) -> Option<&Target> {
        self.file.targets.get(name)
    }

    /// Targets in name order.
    pub fn targets(&self) -> impl Iterator<Item = (&str, &Target)> {
        self.file.targets.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Resolve a path from the project file against the base directory.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}
