//! Executing project targets.
//!
//! Every call to [`Project::execute_target`] starts from an empty
//! [`TargetOutcome`] and returns it to the caller; tasks report their value
//! through it instead of through shared state.

use super::error::BuildError;
use super::model::{EchoTask, ExecTask, GantTask, Task};
use super::loader::Project;
use crate::config::Config;
use crate::runner::{self, LINE_SEPARATOR, RunOptions, RunResult};
use crate::template::{render_command, vars};
use tracing::{debug, info, warn};

/// Settings shared by all tasks of one execution.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    /// Command template for `gant` tasks.
    pub gant_command: String,
    /// Base options for every external process. The working directory is
    /// always the project's base directory.
    pub run_options: RunOptions,
}

impl ExecutionContext {
    pub fn from_config(config: &Config) -> Self {
        Self {
            gant_command: config.gant_command.clone(),
            run_options: config.run_options(),
        }
    }
}

/// Result of executing one target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetOutcome {
    pub target: String,
    /// Value set by the last task that produces one; empty if none did.
    pub result: String,
    /// Captured output of every task, in order.
    pub transcript: String,
    pub tasks_run: usize,
}

impl Project {
    /// Execute the named target.
    pub fn execute_target(
        &self,
        name: &str,
        ctx: &ExecutionContext,
    ) -> Result<TargetOutcome, BuildError> {
        let target = self.target(name).ok_or_else(|| BuildError::UnknownTarget {
            target: name.to_string(),
            project: self.name().to_string(),
        })?;

        info!(
            project = self.name(),
            target_name = name,
            tasks = target.tasks.len(),
            "executing target"
        );

        let mut outcome = TargetOutcome {
            target: name.to_string(),
            ..Default::default()
        };
        for task in &target.tasks {
            debug!(target_name = name, task = task.kind(), "running task");
            self.run_task(task, ctx, &mut outcome)?;
            outcome.tasks_run += 1;
        }

        Ok(outcome)
    }

    /// Execute the project's default target.
    pub fn execute_default(&self, ctx: &ExecutionContext) -> Result<TargetOutcome, BuildError> {
        let default = self
            .default_target()
            .ok_or_else(|| BuildError::NoDefaultTarget {
                project: self.name().to_string(),
            })?;
        self.execute_target(default, ctx)
    }

    fn run_task(
        &self,
        task: &Task,
        ctx: &ExecutionContext,
        outcome: &mut TargetOutcome,
    ) -> Result<(), BuildError> {
        match task {
            Task::Gant(gant) => self.run_gant(gant, ctx, outcome),
            Task::Echo(echo) => {
                run_echo(echo, outcome);
                Ok(())
            }
            Task::Exec(exec) => self.run_exec(exec, ctx, outcome),
        }
    }

    fn run_gant(
        &self,
        task: &GantTask,
        ctx: &ExecutionContext,
        outcome: &mut TargetOutcome,
    ) -> Result<(), BuildError> {
        // Absolute, since the tool runs with the project directory as cwd.
        let resolved = self.resolve(&task.file);
        let gantfile = match std::fs::canonicalize(&resolved) {
            Ok(path) if path.is_file() => path,
            _ => {
                warn!(path = %resolved.display(), "gantfile not found");
                return Err(BuildError::MissingGantfile { path: resolved });
            }
        };

        let variables = vars([
            ("gantfile", gantfile.to_string_lossy().into_owned()),
            ("target", task.target.clone().unwrap_or_default()),
        ]);
        let argv = render_command(&ctx.gant_command, &variables)?;

        let result = self.spawn(&argv[0], &argv[1..], ctx)?;
        outcome.transcript.push_str(result.output.as_str());
        if !result.is_success() {
            return Err(BuildError::TaskFailed {
                task: "gant",
                exit_code: result.exit_code,
                transcript: outcome.transcript.clone(),
            });
        }

        outcome.result = result.output.trimmed().to_string();
        Ok(())
    }

    fn run_exec(
        &self,
        task: &ExecTask,
        ctx: &ExecutionContext,
        outcome: &mut TargetOutcome,
    ) -> Result<(), BuildError> {
        let result = self.spawn(&task.command, &task.args, ctx)?;
        outcome.transcript.push_str(result.output.as_str());

        if !result.is_success() {
            if task.failonerror {
                return Err(BuildError::TaskFailed {
                    task: "exec",
                    exit_code: result.exit_code,
                    transcript: outcome.transcript.clone(),
                });
            }
            debug!(command = %result.command, exit_code = result.exit_code, "exec failed, continuing");
        }
        Ok(())
    }

    fn spawn<A: AsRef<str>>(
        &self,
        program: &str,
        args: &[A],
        ctx: &ExecutionContext,
    ) -> Result<RunResult, BuildError> {
        let options = ctx.run_options.clone().with_current_dir(self.base_dir());
        runner::run(program, args, &options).map_err(|e| {
            warn!(program = e.program(), error = %e, "task process failed");
            BuildError::from(e)
        })
    }
}

fn run_echo(task: &EchoTask, outcome: &mut TargetOutcome) {
    outcome.transcript.push_str(&task.message);
    outcome.transcript.push_str(LINE_SEPARATOR);
    outcome.result = task.message.clone();
}
