//! Project file schema.
//!
//! # File Format
//!
//! ```yaml
//! name: Gant Ant Task Test
//! default: gantTestDefaultTarget
//! targets:
//!   gantTestDefaultTarget:
//!     description: Run the default Gantfile target.
//!     tasks:
//!       - gant: {}
//!   gantTestNamedTarget:
//!     tasks:
//!       - gant:
//!           file: build.gant
//!           target: gantTestNamedTarget
//!   check:
//!     tasks:
//!       - exec:
//!           command: ant
//!           args: ["-f", "gantTest.xml"]
//!           failonerror: false
//!       - echo:
//!           message: "OK."
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Gantfile used by a `gant` task that names none.
pub const DEFAULT_GANTFILE: &str = "build.gant";

/// Parsed contents of a project file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectFile {
    /// Project name, used in error messages.
    pub name: String,

    /// Target executed when none is requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Targets keyed by name.
    #[serde(default)]
    pub targets: BTreeMap<String, Target>,
}

/// A named unit of build work.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Target {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Tasks run in order; the first failure stops the target.
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// One step of a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    /// Delegate to the external Gant tool.
    Gant(GantTask),
    /// Set the result value to a fixed message.
    Echo(EchoTask),
    /// Run an arbitrary external command.
    Exec(ExecTask),
}

impl Task {
    /// Short task name for logs and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Task::Gant(_) => "gant",
            Task::Echo(_) => "echo",
            Task::Exec(_) => "exec",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GantTask {
    /// Build script, relative to the project file's directory.
    #[serde(default = "default_gantfile")]
    pub file: String,

    /// Gant target; the script's default target when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl Default for GantTask {
    fn default() -> Self {
        Self {
            file: default_gantfile(),
            target: None,
        }
    }
}

fn default_gantfile() -> String {
    DEFAULT_GANTFILE.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EchoTask {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecTask {
    pub command: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    /// Fail the target when the command exits non-zero.
    #[serde(default = "default_true")]
    pub failonerror: bool,
}

fn default_true() -> bool {
    true
}
