// src/orchestrator/run.rs

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{Instrument, error, info, info_span};

use crate::config::model::DEFAULT_STAGGER_SECS;
use crate::errors::{BranchError, MultibuildError, Result};
use crate::sink::ResultSink;
use crate::task::{BranchTask, Mode, TaskContext, TaskReport};

use super::report::{ReportStyle, render_report};

/// Orchestration knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorOptions {
    /// Delay between two task starts.
    ///
    /// Every task checks out into the same working tree; spacing the starts
    /// is the only protection against two checkouts racing each other. It
    /// narrows the window, it does not close it.
    pub stagger: Duration,

    /// Maximum number of tasks running at once; `None` and `Some(0)` are
    /// unbounded.
    pub max_parallel: Option<usize>,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            stagger: Duration::from_secs(DEFAULT_STAGGER_SECS),
            max_parallel: None,
        }
    }
}

/// Launches and joins the branch tasks of one run.
pub struct Orchestrator {
    ctx: Arc<TaskContext>,
    options: OrchestratorOptions,
}

impl Orchestrator {
    pub fn new(ctx: Arc<TaskContext>, options: OrchestratorOptions) -> Self {
        Self { ctx, options }
    }

    pub fn sink(&self) -> &Arc<ResultSink> {
        &self.ctx.sink
    }

    /// Start one task per branch, `stagger` apart, and wait for all of them.
    ///
    /// Reports come back in branch input order. Per-branch failures are
    /// inside the reports; only an empty branch list or an empty branch name
    /// fails the call, before any task starts.
    pub async fn run<S: AsRef<str>>(&self, branches: &[S], mode: &Mode) -> Result<Vec<TaskReport>> {
        if branches.is_empty() {
            return Err(MultibuildError::EmptyBranchSet);
        }
        if branches.iter().any(|b| b.as_ref().is_empty()) {
            return Err(MultibuildError::EmptyBranchName);
        }

        // Zero permits would park every task forever.
        let limiter = self
            .options
            .max_parallel
            .filter(|n| *n > 0)
            .map(|n| Arc::new(Semaphore::new(n.min(Semaphore::MAX_PERMITS))));

        let mut handles: Vec<(String, JoinHandle<TaskReport>)> = Vec::with_capacity(branches.len());

        for (i, branch) in branches.iter().enumerate() {
            let branch = branch.as_ref();
            if i > 0 && !self.options.stagger.is_zero() {
                tokio::time::sleep(self.options.stagger).await;
            }

            let task = BranchTask::new(branch, mode.clone(), Arc::clone(&self.ctx));
            let limiter = limiter.clone();

            info!(branch, index = i, mode = mode.name(), "launching branch task");
            let span = info_span!("branch", branch);
            let handle = tokio::spawn(
                async move {
                    let _permit = match limiter {
                        Some(sem) => sem.acquire_owned().await.ok(),
                        None => None,
                    };
                    task.run().await
                }
                .instrument(span),
            );
            handles.push((branch.to_string(), handle));
        }

        info!(tasks = handles.len(), "waiting ... tasks are working");

        let mut reports = Vec::with_capacity(handles.len());
        for (branch, handle) in handles {
            match handle.await {
                Ok(report) => reports.push(report),
                Err(err) => {
                    error!(branch = %branch, error = %err, "branch task aborted");
                    reports.push(TaskReport {
                        branch,
                        checked_out: false,
                        outcome: Err(BranchError::Aborted(err.to_string())),
                    });
                }
            }
        }

        let failed = reports.iter().filter(|r| !r.succeeded()).count();
        info!(tasks = reports.len(), failed, "tasks finished");

        Ok(reports)
    }

    /// Render the report for `branches` from the sink.
    pub fn render<S: AsRef<str>, W: Write>(
        &self,
        branches: &[S],
        style: ReportStyle,
        out: &mut W,
    ) -> std::io::Result<()> {
        render_report(out, &self.ctx.sink, branches, style)
    }
}
