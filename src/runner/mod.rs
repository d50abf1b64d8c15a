//! Subprocess supervision.
//!
//! This module runs external tools (ant, gant, or anything else) and captures
//! their standard output:
//!
//! - **Process**: spawn, wait (optionally bounded by a timeout), collect
//! - **Drain**: line-by-line stdout reader on a dedicated thread
//! - **Options**: timeout, stderr handling, working directory, environment
//! - **Transcript**: normalisation and exact-match comparison of output
//!
//! Start failures, read errors, abnormal reader termination and timeouts are
//! fatal for the run and never retried. A non-zero exit code is ordinary data.

mod drain;
mod error;
mod options;
mod process;
pub mod transcript;


// Re-export public API
pub use drain::{CapturedOutput, LINE_SEPARATOR};
pub use error::RunnerError;
pub use options::{RunOptions, StderrMode};
pub use process::{RunResult, UNKNOWN_EXIT_CODE, run};
