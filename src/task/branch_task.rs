// src/task/branch_task.rs

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::distro::ansible_platform;
use crate::errors::BranchError;
use crate::exec::CommandOutput;
use crate::remote::BuildRecord;
use crate::sink::{BUILDS_BUCKET, SUMMARY_BUCKET, Stream, TAGS_BUCKET};

use super::context::TaskContext;
use super::mode::Mode;
use super::state::{TaskReport, TaskState};

type BodyResult = Result<(), BranchError>;

/// One branch worth of work: checkout, then the mode body.
///
/// All output goes to the shared sink under the branch name. Errors never
/// escape [`BranchTask::run`]; they end up in the returned [`TaskReport`].
pub struct BranchTask {
    branch: String,
    mode: Mode,
    ctx: Arc<TaskContext>,
    state: TaskState,
}

impl BranchTask {
    pub fn new(branch: impl Into<String>, mode: Mode, ctx: Arc<TaskContext>) -> Self {
        Self {
            branch: branch.into(),
            mode,
            ctx,
            state: TaskState::Created,
        }
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    /// Drive the task to `Completed`.
    pub async fn run(mut self) -> TaskReport {
        info!(branch = %self.branch, mode = self.mode.name(), "starting branch task");

        let outcome = match self.checkout().await {
            Ok(()) => self.run_body().await,
            Err(err) => Err(err),
        };
        let checked_out = self.state == TaskState::CheckedOut;
        self.transition(TaskState::Completed);

        match &outcome {
            Ok(()) => info!(branch = %self.branch, "branch task finished"),
            Err(err) => warn!(branch = %self.branch, error = %err, "branch task finished early"),
        }

        TaskReport {
            branch: self.branch,
            checked_out,
            outcome,
        }
    }

    fn transition(&mut self, next: TaskState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal transition {:?} -> {:?}",
            self.state,
            next
        );
        debug!(branch = %self.branch, from = ?self.state, to = ?next, "task state change");
        self.state = next;
    }

    async fn checkout(&mut self) -> BodyResult {
        let command = format!("git checkout {}", self.branch);
        let output = self.run_recorded(&command).await;

        if output.success() {
            self.transition(TaskState::CheckedOut);
            Ok(())
        } else {
            self.transition(TaskState::CheckoutFailed);
            Err(BranchError::CheckoutFailed {
                exit_code: output.exit_code,
            })
        }
    }

    async fn run_body(&self) -> BodyResult {
        match &self.mode {
            Mode::Standard(command) => self.run_standard(command).await,
            Mode::Tag => self.run_tag().await,
            Mode::Summary => self.run_summary().await,
            Mode::WaitRepo => self.run_wait_repo().await,
            Mode::RegenRemoteRepo => self.run_regen_remote_repo().await,
        }
    }

    /// Build, scratch-build or a custom command. The exit code is recorded
    /// but not interpreted.
    async fn run_standard(&self, command: &str) -> BodyResult {
        debug!(branch = %self.branch, cmd = command, "standard command");
        self.run_recorded(command).await;
        Ok(())
    }

    async fn run_tag(&self) -> BodyResult {
        let verrel = self.local_verrel().await?;
        let service = self.ctx.distribution.toolset().remote_service;

        match self.query_build(&verrel).await? {
            Some(record) if record.nvr == verrel => {}
            other => {
                let remote = other.map(|r| r.nvr).unwrap_or_default();
                error!(
                    branch = %self.branch,
                    "{service} nvr '{remote}' does not match with {} verrel '{verrel}'",
                    self.ctx.distribution.toolset().local_tool
                );
                return Err(BranchError::RemoteRecordMismatch {
                    local: verrel,
                    remote,
                });
            }
        }

        let command = format!("{service} tag-build {} {verrel}", self.branch);
        let output = self.run_recorded(&command).await;
        if !output.success() {
            return Err(BranchError::CommandFailed {
                exit_code: output.exit_code,
            });
        }

        let hint = format!(
            "\nYou can wait for repo regeneration by executing command:\n  {service} wait-repo {}-build --build={verrel}\n",
            self.branch
        );
        self.ctx.sink.append_output(&self.branch, hint);
        Ok(())
    }

    async fn run_summary(&self) -> BodyResult {
        let verrel = self.local_verrel().await?;

        let build_id = self.query_build(&verrel).await?.and_then(|r| r.build_id);
        let Some(build_id) = build_id else {
            error!(branch = %self.branch, "build_id wasn't found for '{verrel}'");
            return Err(BranchError::MissingBuildId(verrel));
        };

        let url = format_build_url(&self.ctx.url_template, build_id);
        self.ctx.sink.append_row(
            Stream::Output,
            &[
                (SUMMARY_BUCKET, format!("[{verrel}|{url}]")),
                (BUILDS_BUCKET, verrel.clone()),
                (TAGS_BUCKET, self.branch.clone()),
            ],
        );
        Ok(())
    }

    /// Does not check that the build was tagged first.
    async fn run_wait_repo(&self) -> BodyResult {
        let verrel = self.local_verrel().await?;
        let service = self.ctx.distribution.toolset().remote_service;

        warn!(branch = %self.branch, "not checking whether build is already tagged");
        let command = format!("{service} wait-repo --build={verrel} {}-build", self.branch);
        self.run_recorded(&command).await;
        Ok(())
    }

    async fn run_regen_remote_repo(&self) -> BodyResult {
        let verrel = self.local_verrel().await?;

        let Some(platform) = ansible_platform(&self.branch) else {
            error!(branch = %self.branch, "unknown ansible platform for branch");
            return Err(BranchError::UnrecognizedPlatform(self.branch.clone()));
        };

        let Some(client) = &self.ctx.automation else {
            error!(branch = %self.branch, "no remote automation client configured");
            return Err(BranchError::JobNotStarted);
        };

        let job_id = client
            .launch_job(&platform, &verrel)
            .await
            .ok_or(BranchError::JobNotStarted)?;

        info!(branch = %self.branch, job_id, %platform, "regeneration job started");
        self.ctx.sink.append_output(
            &self.branch,
            format!("Regeneration job: {}\n", client.job_url(job_id)),
        );
        Ok(())
    }

    /// Verrel from `nvr.format`, else from `<local tool> verrel`.
    async fn local_verrel(&self) -> Result<String, BranchError> {
        if let Some(format) = &self.ctx.nvr_format {
            return Ok(format.replace("{branch}", &self.branch));
        }

        let command = format!("{} verrel", self.ctx.distribution.toolset().local_tool);
        let output = self.run_recorded(&command).await;
        let verrel = output.stdout.trim();
        if verrel.is_empty() {
            warn!(branch = %self.branch, "local verrel is empty; nothing to do");
            return Err(BranchError::MissingVerrel);
        }
        Ok(verrel.to_string())
    }

    async fn query_build(&self, nvr: &str) -> Result<Option<BuildRecord>, BranchError> {
        self.ctx.builds.get_build(nvr).await.map_err(|err| {
            error!(branch = %self.branch, nvr, error = %err, "get_build failed");
            BranchError::RemoteQueryFailed(format!("{err:#}"))
        })
    }

    /// Run a command and record non-empty streams under the branch bucket.
    async fn run_recorded(&self, command: &str) -> CommandOutput {
        let output = self.ctx.runner.run(&self.branch, command, None).await;
        if !output.stdout.is_empty() {
            self.ctx.sink.append_output(&self.branch, output.stdout.clone());
        }
        if !output.stderr.is_empty() {
            self.ctx.sink.append_error(&self.branch, output.stderr.clone());
        }
        output
    }
}

/// Substitute the build id into a `%d` URL template.
pub fn format_build_url(template: &str, build_id: u64) -> String {
    template.replacen("%d", &build_id.to_string(), 1)
}
