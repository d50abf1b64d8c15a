//! Build failures raised while executing project targets.

use crate::runner::RunnerError;
use crate::template::TemplateError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from executing a target.
///
/// The display texts of `MissingGantfile` and `UnknownTarget` are fixed
/// strings that callers compare verbatim.
#[derive(Error, Debug)]
pub enum BuildError {
    /// The `gant` task's build script is not a file.
    #[error("Gantfile does not exist.")]
    MissingGantfile { path: PathBuf },

    /// The requested target is not defined.
    #[error("Target \"{target}\" does not exist in the project \"{project}\". ")]
    UnknownTarget { target: String, project: String },

    /// No target was requested and the project has no default.
    #[error("No target specified and no default target in the project \"{project}\".")]
    NoDefaultTarget { project: String },

    /// An external task exited unsuccessfully.
    #[error("{task} task failed with exit code {exit_code}.")]
    TaskFailed {
        task: &'static str,
        exit_code: i32,
        /// Output captured before the failure.
        transcript: String,
    },

    /// `gant_command` could not be rendered.
    #[error("invalid gant_command: {0}")]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Runner(#[from] RunnerError),
}
