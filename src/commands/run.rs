//! Implementation of the `antrun run` command.

use super::{load_config, timeout_override};
use crate::cli::RunArgs;
use crate::config::Config;
use crate::error::{AntrunError, Result};
use crate::exit_codes;
use crate::runner::transcript::{Normalizer, first_mismatch};
use crate::runner::{self, RunOptions, RunResult};
use serde_json::json;
use std::io::Write;
use tracing::debug;

/// Execute the `antrun run` command.
pub fn cmd_run(args: RunArgs) -> Result<i32> {
    let config = load_config()?;
    let stdout = std::io::stdout();
    run_with_config(&args, &config, &mut stdout.lock())
}

/// Run the command, write its transcript (or JSON report) to `out`, then
/// verify it when expectations were given.
///
/// Returns the child's exit code, or success when verification passed.
pub(crate) fn run_with_config<W: Write>(
    args: &RunArgs,
    config: &Config,
    out: &mut W,
) -> Result<i32> {
    let options = run_options(args, config)?;
    let normalizer = Normalizer::new(&args.strip)
        .map_err(|e| AntrunError::UserError(format!("invalid --strip pattern: {}", e)))?;

    let (program, rest) = args
        .command
        .split_first()
        .ok_or_else(|| AntrunError::UserError("no command given to run".to_string()))?;

    if !normalizer.is_empty() {
        debug!(patterns = args.strip.len(), "normalizing transcript");
    }

    let result = runner::run(program, rest, &options)?;
    let transcript = normalizer.apply(result.output.as_str());

    if args.json {
        writeln!(out, "{}", json_report(&result, &transcript)).map_err(write_error)?;
    } else {
        write!(out, "{}", transcript).map_err(write_error)?;
    }
    out.flush().map_err(write_error)?;

    if args.expect.is_none() && args.expect_exit.is_none() {
        return Ok(result.exit_code);
    }

    verify(args, &result, &transcript)?;
    Ok(exit_codes::SUCCESS)
}

fn run_options(args: &RunArgs, config: &Config) -> Result<RunOptions> {
    let mut options = config.run_options();
    if let Some(timeout) = timeout_override(args.timeout)? {
        options.timeout = Some(timeout);
    }
    if let Some(stderr) = args.stderr {
        options.stderr = stderr.into();
    }
    Ok(options)
}

fn verify(args: &RunArgs, result: &RunResult, transcript: &str) -> Result<()> {
    if let Some(expected_code) = args.expect_exit
        && expected_code != result.exit_code
    {
        return Err(AntrunError::VerificationFailed(format!(
            "expected exit code {}, got {}",
            expected_code, result.exit_code
        )));
    }

    if let Some(path) = &args.expect {
        let expected = std::fs::read_to_string(path).map_err(|e| {
            AntrunError::UserError(format!(
                "failed to read expected transcript '{}': {}",
                path.display(),
                e
            ))
        })?;
        if let Some(mismatch) = first_mismatch(&expected, transcript) {
            return Err(AntrunError::VerificationFailed(format!(
                "transcript differs from '{}' at {}",
                path.display(),
                mismatch
            )));
        }
    }

    Ok(())
}

fn json_report(result: &RunResult, transcript: &str) -> serde_json::Value {
    json!({
        "command": result.command,
        "exit_code": result.exit_code,
        "started_at": result.started_at.to_rfc3339(),
        "duration_ms": result.duration.as_millis() as u64,
        "lines": result.output.line_count(),
        "output": transcript,
        "stderr": result.stderr.as_ref().map(|s| s.as_str()),
    })
}

fn write_error(e: std::io::Error) -> AntrunError {
    AntrunError::UserError(format!("failed to write output: {}", e))
}
