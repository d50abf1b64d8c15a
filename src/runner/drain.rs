//! Background draining of a child's output pipe.
//!
//! The accumulated text lives on the drain thread and is handed back only
//! through [`OutputDrain::finish`], which joins the thread. Holding a
//! [`CapturedOutput`] therefore implies the stream was read to the end.

use super::RunnerError;
use std::fmt;
use std::io::{self, BufRead, BufReader, Read};
use std::thread::{self, JoinHandle};

/// Separator appended after every captured line.
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
/// Separator appended after every captured line.
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// Complete text read from one of a child's output streams.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput(String);

impl CapturedOutput {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of lines the child wrote.
    pub fn line_count(&self) -> usize {
        self.0.lines().count()
    }

    /// The text without its trailing line separators.
    pub fn trimmed(&self) -> &str {
        self.0.trim_end_matches(['\r', '\n'])
    }
}

impl fmt::Display for CapturedOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for CapturedOutput {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CapturedOutput {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Handle to a thread reading one output stream to end-of-file.
pub(crate) struct OutputDrain {
    handle: JoinHandle<io::Result<CapturedOutput>>,
}

impl OutputDrain {
    pub(crate) fn spawn<R>(source: R) -> Self
    where
        R: Read + Send + 'static,
    {
        Self {
            handle: thread::spawn(move || drain_lines(source)),
        }
    }

    /// Block until the stream is exhausted and take its text.
    pub(crate) fn finish(self, program: &str) -> Result<CapturedOutput, RunnerError> {
        match self.handle.join() {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(source)) => Err(RunnerError::StreamIo {
                program: program.to_string(),
                source,
            }),
            Err(_) => Err(RunnerError::Interrupted {
                program: program.to_string(),
                reason: "output reader terminated abnormally".to_string(),
            }),
        }
    }
}

/// Read `source` line by line until EOF.
///
/// A line ends at `\n`, at `\r`, or at `\r\n`, which counts as a single
/// terminator. Invalid UTF-8 is replaced rather than treated as a read error.
pub(crate) fn drain_lines<R: Read>(source: R) -> io::Result<CapturedOutput> {
    let mut reader = BufReader::new(source);
    let mut text = String::new();
    let mut chunk = Vec::new();

    loop {
        chunk.clear();
        if reader.read_until(b'\n', &mut chunk)? == 0 {
            break;
        }
        let terminated = chunk.last() == Some(&b'\n');
        if terminated {
            chunk.pop();
            if chunk.last() == Some(&b'\r') {
                chunk.pop();
            }
        }

        // Every `\r` left in the chunk ends a line of its own.
        let mut lines = chunk.split(|&b| b == b'\r').peekable();
        while let Some(line) = lines.next() {
            let last = lines.peek().is_none();
            if last && line.is_empty() && !terminated {
                break;
            }
            text.push_str(&String::from_utf8_lossy(line));
            text.push_str(LINE_SEPARATOR);
        }
    }

    Ok(CapturedOutput(text))
}
