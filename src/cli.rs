// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{ArgGroup, Parser, ValueEnum};

/// Command-line arguments for `multibuild`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "multibuild",
    version,
    about = "Apply specific action for each dist-git branch in list.",
    long_about = None,
    group(
        ArgGroup::new("action")
            .required(true)
            .args([
                "print_summary",
                "print_jira",
                "build",
                "scratch_build",
                "tag",
                "execute",
                "gather_logs",
                "wait_repo",
                "regen_rcm_repo",
            ])
    )
)]
pub struct CliArgs {
    /// List of dist-git branches.
    ///
    /// If omitted, `branches.active_branches` from the config is used.
    #[arg(value_name = "BRANCH")]
    pub branches: Vec<String>,

    /// Config file (TOML).
    ///
    /// Default: `<config dir>/multibuild/multibuild.toml`. A `multibuild.toml`
    /// in the current directory is always layered on top.
    #[arg(short = 'c', long = "config", value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Prints the summary of available builds.
    #[arg(short = 'p', long)]
    pub print_summary: bool,

    /// Prints the JIRA ticket template.
    #[arg(short = 'j', long)]
    pub print_jira: bool,

    /// Builds from branches.
    #[arg(short = 'b', long)]
    pub build: bool,

    /// Does scratch builds.
    #[arg(short = 's', long)]
    pub scratch_build: bool,

    /// Tags builds.
    #[arg(short = 't', long)]
    pub tag: bool,

    /// Executes a custom command in every branch.
    #[arg(short = 'e', long, value_name = "COMMAND")]
    pub execute: Option<String>,

    /// Gathers build logs of a task and stores them locally.
    #[arg(short = 'l', long, value_name = "TASK_ID")]
    pub gather_logs: Option<u64>,

    /// Waits for build-root repo regeneration.
    #[arg(short = 'w', long)]
    pub wait_repo: bool,

    /// Launches the remote repo regeneration job.
    #[arg(short = 'r', long)]
    pub regen_rcm_repo: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `MULTIBUILD_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// The single action selected on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Summary,
    Jira,
    Build,
    ScratchBuild,
    Tag,
    Execute(String),
    GatherLogs(u64),
    WaitRepo,
    RegenRepo,
}

impl CliArgs {
    /// Resolve the action flags into one [`Action`].
    ///
    /// `clap` already enforces that exactly one of them is present.
    pub fn action(&self) -> Action {
        if let Some(cmd) = &self.execute {
            Action::Execute(cmd.clone())
        } else if let Some(task_id) = self.gather_logs {
            Action::GatherLogs(task_id)
        } else if self.print_summary {
            Action::Summary
        } else if self.print_jira {
            Action::Jira
        } else if self.build {
            Action::Build
        } else if self.scratch_build {
            Action::ScratchBuild
        } else if self.tag {
            Action::Tag
        } else if self.wait_repo {
            Action::WaitRepo
        } else {
            Action::RegenRepo
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
