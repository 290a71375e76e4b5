// src/logs.rs

//! Gathering build logs of a single task (`-l TASK_ID`).
//!
//! Unlike the branch actions this is one sequential step, no checkout and no
//! orchestration.

use tracing::{error, info};

use crate::errors::{MultibuildError, Result};
use crate::exec::CommandRunner;

const BUILD_ARCH_FILTER: &str = r#"jq '.[] | select(.method=="buildArch") | .id'"#;

/// Download the logs of `task_id` (or of its `buildArch` subtask, if it has
/// one) into the current directory. Returns the line to print.
pub async fn gather_logs(runner: &dyn CommandRunner, service: &str, task_id: u64) -> Result<String> {
    let children = runner
        .run(
            "get_subtask",
            &format!("{service} call --json getTaskChildren {task_id}"),
            Some(BUILD_ARCH_FILTER),
        )
        .await;

    let subtask = children.stdout.trim();
    let candidate = if subtask.is_empty() {
        task_id.to_string()
    } else {
        subtask.to_string()
    };
    let log_task_id: u64 = candidate.parse().map_err(|_| {
        error!(task_id = %candidate, "task_id is not valid");
        MultibuildError::InvalidTaskId(candidate.clone())
    })?;

    let result = runner
        .run(
            "gather_logs",
            &format!("{service} download-logs {log_task_id}"),
            None,
        )
        .await;

    if result.success() {
        info!(task_id = log_task_id, "logs were gathered and saved");
    } else {
        error!(task_id = log_task_id, "during gathering or saving logs");
    }
    if !result.stderr.trim().is_empty() {
        error!("{}", result.stderr.trim());
    }

    Ok(format!("=== {} ===", result.stdout.trim()))
}
