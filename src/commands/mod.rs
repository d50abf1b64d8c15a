//! Command implementations for antrun.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Each handler returns the process exit code on success.

mod exec;
mod run;
mod targets;

use crate::cli::Command;
use crate::config::Config;
use crate::error::{AntrunError, Result};
use std::time::Duration;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<i32> {
    match command {
        Command::Run(args) => run::cmd_run(args),
        Command::Exec(args) => exec::cmd_exec(args),
        Command::Targets(args) => targets::cmd_targets(args),
    }
}

/// Load `antrun.yaml` from the current directory, or defaults.
fn load_config() -> Result<Config> {
    let cwd = std::env::current_dir().map_err(|e| {
        AntrunError::UserError(format!("failed to determine current directory: {}", e))
    })?;
    Config::load_from_dir(cwd)
}

/// Validate a `--timeout` flag value.
fn timeout_override(seconds: Option<u64>) -> Result<Option<Duration>> {
    match seconds {
        Some(0) => Err(AntrunError::UserError(
            "--timeout must be greater than 0".to_string(),
        )),
        Some(secs) => Ok(Some(Duration::from_secs(secs))),
        None => Ok(None),
    }
}
