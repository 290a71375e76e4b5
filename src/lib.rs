// src/lib.rs

pub mod cli;
pub mod config;
pub mod distro;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod logs;
pub mod orchestrator;
pub mod remote;
pub mod sink;
pub mod task;

use std::io::Write;
use std::sync::Arc;

use tracing::{info, warn};

use crate::cli::{Action, CliArgs};
use crate::config::model::default_build_info_url_template;
use crate::config::{AnsibleCredentials, ConfigFile, load_layered};
use crate::distro::{DEFAULT_DISTRIBUTION, DistributionResolver, Toolset};
use crate::errors::{MultibuildError, Result};
use crate::exec::{CommandRunner, ShellRunner};
use crate::orchestrator::{Orchestrator, OrchestratorOptions, ReportStyle};
use crate::remote::{AnsibleClient, CliBuildClient, RemoteAutomationClient};
use crate::sink::ResultSink;
use crate::task::{Mode, TaskContext};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - branch list and distribution resolution (pre-flight)
/// - credentials for remote repo regeneration (pre-flight)
/// - the orchestrator and its report
///
/// Per-branch failures are reported, not returned: only pre-flight problems
/// make this fail.
pub async fn run(args: CliArgs) -> Result<()> {
    let project_dir = std::env::current_dir()?;
    let cfg = load_layered(args.config.as_deref(), &project_dir)?;

    let runner: Arc<dyn CommandRunner> = Arc::new(ShellRunner::new());
    let action = args.action();

    if let Action::GatherLogs(task_id) = action {
        let service = DEFAULT_DISTRIBUTION.toolset().remote_service;
        let line = logs::gather_logs(runner.as_ref(), service, task_id).await?;
        println!("{line}");
        return Ok(());
    }

    let branches = resolve_branches(&args.branches, &cfg)?;
    let distribution = DistributionResolver::new().classify_set(&branches)?;
    let toolset = distribution.toolset();
    info!(%distribution, ?branches, "resolved branches");

    let Some((mode, style)) = mode_for_action(&action, toolset) else {
        return Ok(());
    };

    let automation = match mode {
        Mode::RegenRemoteRepo => {
            let credentials = AnsibleCredentials::from_config(&cfg.ansible)?;
            let client = AnsibleClient::new(credentials, cfg.job_template())?;
            Some(Arc::new(client) as Arc<dyn RemoteAutomationClient>)
        }
        _ => None,
    };

    let url_template = match cfg.build_info_url_template(toolset.remote_service) {
        Some(template) => template.to_string(),
        None => {
            if mode == Mode::Summary {
                warn!(
                    service = toolset.remote_service,
                    "config lacks 'build_info_url_template' value; using default"
                );
            }
            default_build_info_url_template(toolset.remote_service).to_string()
        }
    };

    let ctx = TaskContext {
        runner: Arc::clone(&runner),
        builds: Arc::new(CliBuildClient::new(toolset.remote_service, Arc::clone(&runner))),
        automation,
        sink: Arc::new(ResultSink::new()),
        distribution,
        nvr_format: cfg.nvr_format().map(str::to_string),
        url_template,
    };

    let options = OrchestratorOptions {
        stagger: cfg.stagger(),
        max_parallel: cfg.max_parallel(),
    };
    let orchestrator = Orchestrator::new(Arc::new(ctx), options);
    orchestrator.run(&branches, &mode).await?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    orchestrator.render(&branches, style, &mut out)?;
    out.flush()?;

    Ok(())
}

/// Branches from the command line, else `branches.active_branches`.
pub fn resolve_branches(cli_branches: &[String], cfg: &ConfigFile) -> Result<Vec<String>> {
    if !cli_branches.is_empty() {
        return Ok(cli_branches.to_vec());
    }

    let branches = cfg.active_branches();
    if branches.is_empty() {
        return Err(MultibuildError::EmptyBranchSet);
    }
    info!("using branches from a config file");
    Ok(branches)
}

/// Task mode and report style for an action; `None` for actions that do not
/// run branch tasks.
pub fn mode_for_action(action: &Action, toolset: Toolset) -> Option<(Mode, ReportStyle)> {
    let plan = match action {
        Action::Build => (
            Mode::Standard(format!("{} build", toolset.local_tool)),
            ReportStyle::Plain,
        ),
        Action::ScratchBuild => (
            Mode::Standard(format!("{} scratch-build --srpm", toolset.local_tool)),
            ReportStyle::Plain,
        ),
        Action::Execute(command) => (Mode::Standard(command.clone()), ReportStyle::Plain),
        Action::Tag => (Mode::Tag, ReportStyle::Plain),
        Action::Summary => (Mode::Summary, ReportStyle::Plain),
        Action::Jira => (Mode::Summary, ReportStyle::Ticket),
        Action::WaitRepo => (Mode::WaitRepo, ReportStyle::Plain),
        Action::RegenRepo => (Mode::RegenRemoteRepo, ReportStyle::Plain),
        Action::GatherLogs(_) => return None,
    };
    Some(plan)
}
