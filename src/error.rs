//! Error types for the antrun CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.
//! Lower layers carry their own error enums ([`RunnerError`], [`BuildError`]);
//! this module folds them into one type that knows its exit code.

use crate::exit_codes;
use crate::project::BuildError;
use crate::runner::RunnerError;
use thiserror::Error;

/// Main error type for antrun operations.
#[derive(Error, Debug)]
pub enum AntrunError {
    /// User provided invalid arguments, config, or project file.
    #[error("{0}")]
    UserError(String),

    /// A build target or one of its tasks failed.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// The external process could not be supervised to completion.
    #[error(transparent)]
    Runner(#[from] RunnerError),

    /// A transcript or exit code did not match what was expected.
    #[error("Verification failed: {0}")]
    VerificationFailed(String),
}

impl AntrunError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            AntrunError::UserError(_) => exit_codes::USER_ERROR,
            AntrunError::Build(BuildError::Runner(_)) => exit_codes::RUNNER_FAILURE,
            AntrunError::Build(_) => exit_codes::BUILD_FAILURE,
            AntrunError::Runner(_) => exit_codes::RUNNER_FAILURE,
            AntrunError::VerificationFailed(_) => exit_codes::VERIFICATION_FAILURE,
        }
    }
}

/// Result type alias for antrun operations.
pub type Result<T> = std::result::Result<T, AntrunError>;
