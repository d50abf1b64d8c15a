//! Failure conditions of a supervised run.
//!
//! A child that exits with a non-zero code is not an error here; the code is
//! returned as part of [`RunResult`](super::RunResult). Every variant below
//! means no result could be produced.

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Fatal conditions raised by the subprocess runner. None of them are retried.
#[derive(Error, Debug)]
pub enum RunnerError {
    /// The process could not be launched (missing executable, permission denied).
    #[error("failed to start '{program}': {source}\nFix: ensure the command is installed and in PATH.")]
    Start {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Reading the child's output failed part way through.
    #[error("failed to read output of '{program}': {source}")]
    StreamIo {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Waiting for the child failed, or an output reader ended abnormally.
    #[error("interrupted while waiting for '{program}': {reason}")]
    Interrupted { program: String, reason: String },

    /// The child outlived the configured timeout and was killed.
    #[error("'{program}' did not finish within {timeout:?} and was killed")]
    Timeout { program: String, timeout: Duration },
}

impl RunnerError {
    /// Name of the program the failed run was supervising.
    pub fn program(&self) -> &str {
        match self {
            RunnerError::Start { program, .. }
            | RunnerError::StreamIo { program, .. }
            | RunnerError::Interrupted { program, .. }
            | RunnerError::Timeout { program, .. } => program,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_error_mentions_program_and_fix() {
        let err = RunnerError::Start {
            program: "ant".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("failed to start 'ant'"));
        assert!(msg.contains("Fix:"));
        assert_eq!(err.program(), "ant");
    }

    #[test]
    fn timeout_error_reports_exact_duration() {
        let err = RunnerError::Timeout {
            program: "gant".to_string(),
            timeout: Duration::from_millis(2500),
        };
        assert_eq!(
            err.to_string(),
            "'gant' did not finish within 2.5s and was killed"
        );
    }

    #[test]
    fn sub_second_timeout_is_not_rounded_to_zero() {
        let err = RunnerError::Timeout {
            program: "sh".to_string(),
            timeout: Duration::from_millis(300),
        };
        assert_eq!(
            err.to_string(),
            "'sh' did not finish within 300ms and was killed"
        );
    }
}
