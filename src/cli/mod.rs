//! CLI argument parsing for antrun.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::runner::StderrMode;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// antrun: supervise external build tools and run declarative build targets.
///
/// `run` launches any command, captures its stdout transcript, and reports
/// its exit code. `exec` runs a target from a project file, delegating
/// `gant` tasks to the external Gant tool.
#[derive(Parser, Debug)]
#[command(name = "antrun")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). ANTRUN_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for antrun.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run an external command and capture its transcript.
    ///
    /// Prints the captured stdout and exits with the command's exit code.
    /// With --expect or --expect-exit, compares instead and exits 0 on a
    /// match.
    Run(RunArgs),

    /// Execute a target from a project file.
    ///
    /// Prints the target's result value. Uses the project's default target
    /// when none is given.
    Exec(ExecArgs),

    /// List the targets of a project file.
    Targets(TargetsArgs),
}

/// Stderr handling selectable on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StderrArg {
    Inherit,
    Discard,
    Capture,
}

impl From<StderrArg> for StderrMode {
    fn from(arg: StderrArg) -> Self {
        match arg {
            StderrArg::Inherit => StderrMode::Inherit,
            StderrArg::Discard => StderrMode::Discard,
            StderrArg::Capture => StderrMode::Capture,
        }
    }
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Kill the command after this many seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// How to treat the command's stderr (default from antrun.yaml).
    #[arg(long, value_enum)]
    pub stderr: Option<StderrArg>,

    /// Regex removed (first match) from the transcript before printing or
    /// comparing. May be repeated.
    #[arg(long)]
    pub strip: Vec<String>,

    /// File holding the exact transcript the command must produce.
    #[arg(long)]
    pub expect: Option<PathBuf>,

    /// Exit code the command must return.
    #[arg(long, allow_negative_numbers = true)]
    pub expect_exit: Option<i32>,

    /// Print a JSON report instead of the raw transcript.
    #[arg(long)]
    pub json: bool,

    /// Command and arguments to run.
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

/// Arguments for the `exec` command.
#[derive(Parser, Debug)]
pub struct ExecArgs {
    /// Target to execute (the project default when omitted).
    pub target: Option<String>,

    /// Project file (default from antrun.yaml, else build.yaml).
    #[arg(short = 'f', long = "file")]
    pub file: Option<PathBuf>,

    /// Kill external tasks after this many seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Also print the captured output of every task.
    #[arg(long)]
    pub transcript: bool,
}

/// Arguments for the `targets` command.
#[derive(Parser, Debug)]
pub struct TargetsArgs {
    /// Project file (default from antrun.yaml, else build.yaml).
    #[arg(short = 'f', long = "file")]
    pub file: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
