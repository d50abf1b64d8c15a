//! Declarative project model.
//!
//! A project file names targets; each target is an ordered list of tasks.
//! The `gant` task hands its build script to the external Gant tool through
//! the subprocess runner, `exec` runs any command, and `echo` sets a fixed
//! result. Ant's dependency graph and property expansion are not modelled.

mod error;
mod execute;
mod model;
mod loader;


// Re-export public API
pub use error::BuildError;
pub use execute::{ExecutionContext, TargetOutcome};
pub use model::{DEFAULT_GANTFILE, EchoTask, ExecTask, GantTask, ProjectFile, Target, Task};
pub use loader::Project;
