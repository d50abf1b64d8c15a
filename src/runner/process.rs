//! Spawning, waiting on, and collecting a supervised child process.

use super::drain::{CapturedOutput, OutputDrain};
use super::options::{RunOptions, StderrMode};
use super::RunnerError;
use chrono::{DateTime, Utc};
use std::io;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// How often a child is polled while a timeout is armed.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Exit code reported when the platform gives neither a code nor a signal.
pub const UNKNOWN_EXIT_CODE: i32 = -1;

/// Outcome of one completed run.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// The command line that was executed (for logging).
    pub command: String,
    /// Everything the child wrote to stdout.
    pub output: CapturedOutput,
    /// Exit code of the child.
    pub exit_code: i32,
    /// Stderr text, present only with [`StderrMode::Capture`].
    pub stderr: Option<CapturedOutput>,
    /// When the child was spawned.
    pub started_at: DateTime<Utc>,
    /// Wall-clock time from spawn to collection.
    pub duration: Duration,
}

impl RunResult {
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Run `program` with `args`, capturing stdout and waiting for it to exit.
///
/// Stdout is drained on a dedicated thread while this thread waits for the
/// child. The drain is joined only after the child has exited, and the
/// result is built from the joined text, so the returned output is always
/// complete. A non-zero exit is returned as data.
pub fn run<A: AsRef<str>>(
    program: &str,
    args: &[A],
    options: &RunOptions,
) -> Result<RunResult, RunnerError> {
    let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
    let command_line = shell_words::join(std::iter::once(program).chain(args.iter().copied()));

    let mut command = Command::new(program);
    command
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(options.stderr.stdio())
        .envs(&options.environment);
    if let Some(dir) = &options.current_dir {
        command.current_dir(dir);
    }
    // The child leads its own process group; a timeout kills the group.
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }

    debug!(command = %command_line, timeout = ?options.timeout, "spawning process");
    let started_at = Utc::now();
    let start = Instant::now();
    let mut child = command.spawn().map_err(|source| RunnerError::Start {
        program: program.to_string(),
        source,
    })?;

    let Some(stdout) = child.stdout.take() else {
        kill_process(&mut child);
        return Err(RunnerError::StreamIo {
            program: program.to_string(),
            source: io::Error::other("stdout of child was not piped"),
        });
    };
    let stdout_drain = OutputDrain::spawn(stdout);
    let stderr_drain = match options.stderr {
        StderrMode::Capture => child.stderr.take().map(OutputDrain::spawn),
        StderrMode::Inherit | StderrMode::Discard => None,
    };

    let status = match wait_for_exit(&mut child, options.timeout) {
        Ok(Some(status)) => status,
        Ok(None) => {
            // The whole group is dead, so the pipes are closed and the
            // drains finish. Their text is discarded.
            let _ = stdout_drain.finish(program);
            if let Some(drain) = stderr_drain {
                let _ = drain.finish(program);
            }
            let timeout = options.timeout.unwrap_or_default();
            warn!(command = %command_line, timeout_ms = timeout.as_millis() as u64, "process timed out and was killed");
            return Err(RunnerError::Timeout {
                program: program.to_string(),
                timeout,
            });
        }
        Err(e) => {
            kill_process(&mut child);
            return Err(RunnerError::Interrupted {
                program: program.to_string(),
                reason: format!("failed to wait for process: {}", e),
            });
        }
    };

    let output = stdout_drain.finish(program)?;
    let stderr = stderr_drain
        .map(|drain| drain.finish(program))
        .transpose()?;
    let exit_code = exit_code_of(status);
    let duration = start.elapsed();

    debug!(
        command = %command_line,
        exit_code,
        lines = output.line_count(),
        duration_ms = duration.as_millis() as u64,
        "process finished"
    );

    Ok(RunResult {
        command: command_line,
        output,
        exit_code,
        stderr,
        started_at,
        duration,
    })
}

/// Wait for the child, bounded by `timeout` when one is given.
///
/// Returns `Ok(None)` if the timeout expired; the child has been killed and
/// reaped by then.
fn wait_for_exit(child: &mut Child, timeout: Option<Duration>) -> io::Result<Option<ExitStatus>> {
    let Some(timeout) = timeout else {
        return child.wait().map(Some);
    };

    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if start.elapsed() >= timeout {
            kill_process(child);
            return Ok(None);
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

/// Kill a process (on Unix, its whole process group) and wait for it to
/// terminate.
fn kill_process(child: &mut Child) {
    #[cfg(unix)]
    {
        use nix::sys::signal::{Signal, killpg};
        use nix::unistd::Pid;

        // The child leads its own group, so its pid is the group id.
        let pgid = Pid::from_raw(child.id() as i32);
        if let Err(errno) = killpg(pgid, Signal::SIGKILL) {
            debug!(pid = child.id(), %errno, "killpg failed, killing the child only");
            let _ = child.kill();
        }
    }
    #[cfg(not(unix))]
    {
        // TerminateProcess
        let _ = child.kill();
    }
    let _ = child.wait();
}

/// Numeric exit code, using the shell's `128 + signal` convention for
/// children killed by a signal.
fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    UNKNOWN_EXIT_CODE
}
