//! Implementation of the `antrun exec` command.

use super::{load_config, timeout_override};
use crate::cli::ExecArgs;
use crate::config::Config;
use crate::error::{AntrunError, Result};
use crate::exit_codes;
use crate::project::{ExecutionContext, Project};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Execute the `antrun exec` command.
pub fn cmd_exec(args: ExecArgs) -> Result<i32> {
    let config = load_config()?;
    let stdout = std::io::stdout();
    exec_with_config(&args, &config, &mut stdout.lock())
}

/// Load the project, execute the requested target, and print its result.
pub(crate) fn exec_with_config<W: Write>(
    args: &ExecArgs,
    config: &Config,
    out: &mut W,
) -> Result<i32> {
    let path = project_path(args.file.as_ref(), config);
    let project = Project::load(&path)?;

    let mut ctx = ExecutionContext::from_config(config);
    if let Some(timeout) = timeout_override(args.timeout)? {
        ctx.run_options.timeout = Some(timeout);
    }

    let outcome = match &args.target {
        Some(target) => project.execute_target(target, &ctx)?,
        None => project.execute_default(&ctx)?,
    };
    info!(
        target_name = %outcome.target,
        tasks = outcome.tasks_run,
        "target completed"
    );

    let write_error =
        |e: std::io::Error| AntrunError::UserError(format!("failed to write output: {}", e));
    if args.transcript {
        write!(out, "{}", outcome.transcript).map_err(write_error)?;
    }
    if !outcome.result.is_empty() {
        writeln!(out, "{}", outcome.result).map_err(write_error)?;
    }
    out.flush().map_err(write_error)?;

    Ok(exit_codes::SUCCESS)
}

/// Project file from `--file`, else `project_file` in the config.
pub(super) fn project_path(file: Option<&PathBuf>, config: &Config) -> PathBuf {
    file.cloned()
        .unwrap_or_else(|| PathBuf::from(&config.project_file))
}
