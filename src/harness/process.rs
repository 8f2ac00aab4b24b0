// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Blocking subprocess execution with a timeout

use log::debug;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::errors::{HarnessError, Result};

/// A fully built command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Shell-like rendering for logs
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Exit status and captured streams of a finished process
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutput {
    /// `None` when the process was terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn status_str(&self) -> String {
        match self.code {
            Some(code) => format!("exit code {}", code),
            None => "signal".to_string(),
        }
    }

    /// Last few lines of stderr, for error messages
    pub fn stderr_tail(&self) -> String {
        let lines: Vec<&str> = self.stderr.lines().collect();
        let start = lines.len().saturating_sub(5);
        lines[start..].join("\n")
    }
}

/// Runs one command to completion
pub trait CommandExecutor {
    /// Fails with `LaunchFailed` when the program cannot be started and
    /// `TimedOut` when it outlives the executor's timeout. A non-zero exit is
    /// not an error here; callers inspect `ProcessOutput::code`.
    fn execute(&self, spec: &CommandSpec) -> Result<ProcessOutput>;
}

impl<T: CommandExecutor + ?Sized> CommandExecutor for &T {
    fn execute(&self, spec: &CommandSpec) -> Result<ProcessOutput> {
        (**self).execute(spec)
    }
}

/// Executes commands as real child processes, one at a time
#[derive(Debug, Clone)]
pub struct SystemExecutor {
    timeout: Duration,
    poll_interval: Duration,
}

impl SystemExecutor {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            poll_interval: Duration::from_millis(10),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl CommandExecutor for SystemExecutor {
    fn execute(&self, spec: &CommandSpec) -> Result<ProcessOutput> {
        debug!("exec: {}", spec.command_line());

        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(ref dir) = spec.current_dir {
            command.current_dir(dir);
        }

        let mut child = command.spawn().map_err(|source| HarnessError::LaunchFailed {
            program: spec.program.clone(),
            source,
        })?;

        // Drain both pipes while polling so a chatty child cannot block on a full pipe
        let stdout_reader = spawn_reader(child.stdout.take());
        let stderr_reader = spawn_reader(child.stderr.take());

        let start = Instant::now();
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if start.elapsed() >= self.timeout => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(HarnessError::TimedOut {
                        program: spec.program.clone(),
                        timeout: self.timeout,
                    });
                }
                Ok(None) => thread::sleep(self.poll_interval),
                Err(source) => return Err(HarnessError::io(&spec.program, source)),
            }
        };

        Ok(ProcessOutput {
            code: status.code(),
            stdout: join_reader(stdout_reader),
            stderr: join_reader(stderr_reader),
        })
    }
}

fn spawn_reader<R>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>>
where
    R: Read + Send + 'static,
{
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            buf
        })
    })
}

fn join_reader(handle: Option<JoinHandle<Vec<u8>>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .map(|buf| String::from_utf8_lossy(&buf).into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line() {
        let spec = CommandSpec::new("findedge").arg("140").arg("a.off");
        assert_eq!(spec.command_line(), "findedge 140 a.off");
    }

    #[test]
    fn test_stderr_tail() {
        let output = ProcessOutput {
            code: Some(1),
            stdout: String::new(),
            stderr: (1..=8).map(|i| format!("line {}\n", i)).collect(),
        };
        assert_eq!(output.stderr_tail(), "line 4\nline 5\nline 6\nline 7\nline 8");
        assert_eq!(output.status_str(), "exit code 1");
        assert!(!output.success());
    }

    #[test]
    fn test_missing_program() {
        let executor = SystemExecutor::new(Duration::from_secs(5));
        let err = executor
            .execute(&CommandSpec::new("isosweep-no-such-tool-8d1f"))
            .unwrap_err();
        assert!(matches!(err, HarnessError::LaunchFailed { .. }));
    }
}
