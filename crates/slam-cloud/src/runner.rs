use crate::error::ToolError;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

/// One external command: program, argv, and working directory.
///
/// Arguments are passed straight to the program, never through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new<I, S>(program: &str, args: I, cwd: &Path) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_owned(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: cwd.to_path_buf(),
        }
    }

    pub fn has_arg(&self, arg: &str) -> bool {
        self.args.iter().any(|a| a == arg)
    }

    /// Human-readable form, for logs and assertions.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Abstraction over process execution for testability.
///
/// Production code uses [`RealRunner`]. Tests use mockall-generated mocks or
/// `RecordingRunner` from the `testing` feature.
#[allow(async_fn_in_trait)]
pub trait ProcessRunner: Send + Sync {
    /// Run a command and capture stdout.
    async fn exec(&self, invocation: &Invocation) -> Result<String, ToolError>;

    /// Run a command, streaming its output to the terminal.
    async fn exec_streaming(&self, invocation: &Invocation) -> Result<(), ToolError>;
}

/// Runs commands with `tokio::process`, one at a time.
#[derive(Debug, Clone, Default)]
pub struct RealRunner {
    timeout: Option<Duration>,
}

impl RealRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill and fail any command running longer than `timeout`.
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    fn command(invocation: &Invocation) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .current_dir(&invocation.cwd)
            .kill_on_drop(true);
        cmd
    }

    async fn bounded<F: Future>(
        &self,
        invocation: &Invocation,
        fut: F,
    ) -> Result<F::Output, ToolError> {
        let Some(after) = self.timeout else {
            return Ok(fut.await);
        };

        match tokio::time::timeout(after, fut).await {
            Ok(output) => Ok(output),
            Err(elapsed) => {
                tracing::warn!(command = %invocation.command_line(), %elapsed, "command timed out");
                Err(ToolError::TimedOut {
                    program: invocation.program.clone(),
                    after,
                })
            }
        }
    }
}

impl ProcessRunner for RealRunner {
    async fn exec(&self, invocation: &Invocation) -> Result<String, ToolError> {
        tracing::debug!(command = %invocation.command_line(), cwd = %invocation.cwd.display(), "exec");

        let mut cmd = Self::command(invocation);
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

        let output = self
            .bounded(invocation, cmd.output())
            .await?
            .map_err(|e| spawn_error(invocation, e))?;

        if output.status.success() {
            String::from_utf8(output.stdout).map_err(|e| ToolError::InvalidUtf8 {
                program: invocation.program.clone(),
                source: e,
            })
        } else {
            Err(ToolError::CommandFailed {
                program: invocation.program.clone(),
                args: invocation.args.clone(),
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }

    async fn exec_streaming(&self, invocation: &Invocation) -> Result<(), ToolError> {
        tracing::debug!(command = %invocation.command_line(), cwd = %invocation.cwd.display(), "exec (streaming)");

        let mut cmd = Self::command(invocation);
        cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());

        let status = self
            .bounded(invocation, cmd.status())
            .await?
            .map_err(|e| spawn_error(invocation, e))?;

        if status.success() {
            Ok(())
        } else {
            Err(ToolError::CommandFailed {
                program: invocation.program.clone(),
                args: invocation.args.clone(),
                status: status.code(),
                stderr: String::new(),
            })
        }
    }
}

fn spawn_error(invocation: &Invocation, e: std::io::Error) -> ToolError {
    let program = invocation.program.clone();
    if e.kind() == std::io::ErrorKind::NotFound {
        ToolError::NotFound { program, source: e }
    } else {
        ToolError::Spawn { program, source: e }
    }
}
