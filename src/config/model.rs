//! Config struct definition and default implementation.

use super::types::*;
use crate::runner::StderrMode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for antrun.
///
/// This struct represents the contents of `antrun.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Runner settings
    // =========================================================================
    /// Kill external processes that run longer than this. Unset waits forever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,

    /// Handling of child stderr.
    #[serde(default)]
    pub stderr: StderrMode,

    /// Environment variables set for every child process.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: BTreeMap<String, String>,

    // =========================================================================
    // Project settings
    // =========================================================================
    /// Project file used by `exec` and `targets` when `-f` is not given.
    #[serde(default = "default_project_file")]
    pub project_file: String,

    /// Command template for the `gant` task.
    #[serde(default = "default_gant_command")]
    pub gant_command: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_seconds: None,
            stderr: StderrMode::default(),
            environment: BTreeMap::new(),
            project_file: default_project_file(),
            gant_command: default_gant_command(),
        }
    }
}
