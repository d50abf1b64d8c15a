//! Per-run settings for the subprocess runner.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

/// What happens to the child's standard-error stream.
///
/// Stderr never ends up in the captured stdout transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StderrMode {
    /// Pass through to our own stderr (default).
    #[default]
    Inherit,
    /// Send to the null device.
    Discard,
    /// Drain on a second thread and return it separately.
    Capture,
}

impl StderrMode {
    pub(crate) fn stdio(self) -> Stdio {
        match self {
            StderrMode::Inherit => Stdio::inherit(),
            StderrMode::Discard => Stdio::null(),
            StderrMode::Capture => Stdio::piped(),
        }
    }
}

/// Options for a single supervised run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Kill the child and fail the run once this much time has passed.
    /// `None` waits indefinitely.
    pub timeout: Option<Duration>,

    /// Handling of the child's stderr.
    pub stderr: StderrMode,

    /// Working directory for the child (inherits ours when unset).
    pub current_dir: Option<PathBuf>,

    /// Extra environment variables layered over the inherited environment.
    pub environment: BTreeMap<String, String>,
}

impl RunOptions {
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_stderr(mut self, stderr: StderrMode) -> Self {
        self.stderr = stderr;
        self
    }

    pub fn with_current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(key.into(), value.into());
        self
    }
}
