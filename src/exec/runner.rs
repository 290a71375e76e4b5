// src/exec/runner.rs

//! Pluggable external command runner.
//!
//! Branch tasks talk to a [`CommandRunner`] instead of spawning processes
//! themselves. Production code uses [`ShellRunner`](super::ShellRunner);
//! tests provide a fake that scripts exit codes and records invocations.

use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by [`CommandRunner::run`].
pub type RunFuture<'a> = Pin<Box<dyn Future<Output = CommandOutput> + Send + 'a>>;

/// Captured result of one external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Output used when the command could not even be started.
    pub fn spawn_failure(err: &anyhow::Error) -> Self {
        Self {
            stdout: String::new(),
            stderr: format!("{err:#}"),
            exit_code: -1,
        }
    }
}

impl From<std::process::Output> for CommandOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code().unwrap_or(-1),
        }
    }
}

/// Trait abstracting how external commands are executed.
///
/// Implementations never fail: a non-zero exit or a spawn error is reported
/// through [`CommandOutput::exit_code`] and the caller decides what to do.
pub trait CommandRunner: Send + Sync {
    /// Run `command` in a shell. With `pipe`, the first command's stdout is
    /// fed into `pipe` and only the second command's streams are returned.
    ///
    /// `label` names the caller (usually the branch) in log lines.
    fn run<'a>(&'a self, label: &'a str, command: &'a str, pipe: Option<&'a str>)
    -> RunFuture<'a>;
}
