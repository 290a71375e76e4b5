// src/exec/shell.rs

//! `tokio::process` implementation of [`CommandRunner`].

use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, error, info};

use super::runner::{CommandOutput, CommandRunner, RunFuture};

/// Runs commands through the platform shell and captures both streams.
///
/// There is no timeout: a hanging command hangs only the caller awaiting it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ShellRunner {
    fn run<'a>(
        &'a self,
        label: &'a str,
        command: &'a str,
        pipe: Option<&'a str>,
    ) -> RunFuture<'a> {
        Box::pin(async move {
            let command_str = match pipe {
                Some(p) => format!("{command} | {p}"),
                None => command.to_string(),
            };
            info!(label, cmd = %command_str, "executing command");

            let result = match pipe {
                Some(p) => run_piped(label, command, p).await,
                None => run_single(command).await,
            };

            let output = result.unwrap_or_else(|err| {
                error!(label, cmd = %command_str, error = %err, "command could not be run");
                CommandOutput::spawn_failure(&err)
            });

            if !output.success() {
                error!(
                    label,
                    cmd = %command_str,
                    exit_code = output.exit_code,
                    "command exited with non-zero status"
                );
            }

            output
        })
    }
}

/// Build a shell command appropriate for the platform.
fn shell_command(command: &str) -> Command {
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(command);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(command);
        c
    };
    cmd.kill_on_drop(true);
    cmd
}

async fn run_single(command: &str) -> Result<CommandOutput> {
    let mut cmd = shell_command(command);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let output = cmd
        .output()
        .await
        .with_context(|| format!("running '{command}'"))?;

    Ok(CommandOutput::from(output))
}

/// `command | pipe`. The stderr of `command` is only logged at debug level
/// and is not part of the returned output.
async fn run_piped(label: &str, command: &str, pipe: &str) -> Result<CommandOutput> {
    let mut source = shell_command(command);
    source
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut source_child = source
        .spawn()
        .with_context(|| format!("spawning '{command}'"))?;

    let source_stdout: Stdio = source_child
        .stdout
        .take()
        .context("pipe source stdout was not captured")?
        .try_into()
        .context("turning pipe source stdout into stdin")?;

    // Always consume stderr so buffers don't fill.
    if let Some(stderr) = source_child.stderr.take() {
        let label = label.to_string();
        tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!(label = %label, "pipe source stderr: {}", line);
            }
        });
    }

    let mut sink = shell_command(pipe);
    sink.stdin(source_stdout)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let output = sink
        .output()
        .await
        .with_context(|| format!("running '{pipe}'"))?;

    match source_child.wait().await {
        Ok(status) => debug!(label, cmd = command, code = ?status.code(), "pipe source exited"),
        Err(e) => debug!(label, cmd = command, error = %e, "waiting for pipe source failed"),
    }

    Ok(CommandOutput::from(output))
}
