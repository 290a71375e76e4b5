// src/task/context.rs

use std::sync::Arc;

use crate::distro::Distribution;
use crate::exec::CommandRunner;
use crate::remote::{RemoteAutomationClient, RemoteBuildClient};
use crate::sink::ResultSink;

/// Collaborators and run-wide settings shared by every branch task.
///
/// Everything here is resolved before the first task starts.
pub struct TaskContext {
    pub runner: Arc<dyn CommandRunner>,
    pub builds: Arc<dyn RemoteBuildClient>,
    /// Only present for runs that regenerate remote repos.
    pub automation: Option<Arc<dyn RemoteAutomationClient>>,
    pub sink: Arc<ResultSink>,
    pub distribution: Distribution,
    /// Fixed verrel (with `{branch}` placeholder) replacing the local tool lookup.
    pub nvr_format: Option<String>,
    /// Build-info URL with a single `%d` placeholder.
    pub url_template: String,
}
