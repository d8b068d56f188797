// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! External process execution with captured output.

use crate::error::{ManifestError, Result};
use std::future::Future;
use std::io::ErrorKind;
use std::process::{Output, Stdio};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Exit status and captured streams of one finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationResult {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl InvocationResult {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    pub fn exit_cause(&self) -> String {
        match self.exit_code {
            Some(code) => format!("exit status {}", code),
            None => "terminated by signal".to_string(),
        }
    }

    /// Turn a nonzero exit into an `InvocationFailure` carrying stderr verbatim
    pub fn into_result(self, command: &str) -> Result<Self> {
        if self.success() {
            return Ok(self);
        }
        Err(ManifestError::InvocationFailure {
            command: command.to_string(),
            cause: self.exit_cause(),
            stderr: self.stderr,
        })
    }
}

impl From<Output> for InvocationResult {
    fn from(output: Output) -> Self {
        Self {
            exit_code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        }
    }
}

/// Trait for executing external commands (allows mocking in tests)
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, writing `stdin` to the child when given.
    ///
    /// Returns whatever the process produced; a nonzero exit is not an error
    /// at this level, only a failure to run the process at all.
    fn execute(
        &self,
        program: &str,
        args: &[String],
        stdin: Option<&[u8]>,
    ) -> impl Future<Output = Result<InvocationResult>> + Send;
}

/// Runs real processes through tokio
#[derive(Debug, Default, Clone)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    #[instrument(skip(self, args, stdin))]
    async fn execute(
        &self,
        program: &str,
        args: &[String],
        stdin: Option<&[u8]>,
    ) -> Result<InvocationResult> {
        let command = command_line(program, args);
        let execution_error = |source| ManifestError::CommandExecution {
            command: command.clone(),
            source,
        };

        debug!(command = %command, "Executing");

        let mut child = Command::new(program)
            .args(args)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(execution_error)?;

        // Feed stdin while collecting output so a chatty child cannot block on a full pipe.
        let pipe = child.stdin.take();
        let feed = async move {
            if let (Some(mut pipe), Some(input)) = (pipe, stdin) {
                match pipe.write_all(input).await {
                    // The child exited without reading everything; its status tells the story.
                    Err(e) if e.kind() == ErrorKind::BrokenPipe => {}
                    other => other?,
                }
            }
            Ok::<(), std::io::Error>(())
        };

        let ((), output) =
            tokio::try_join!(feed, child.wait_with_output()).map_err(execution_error)?;
        let result = InvocationResult::from(output);

        debug!(command = %command, cause = %result.exit_cause(), "Finished");
        Ok(result)
    }
}

/// Space-joined command line used in error messages and logs
pub fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
