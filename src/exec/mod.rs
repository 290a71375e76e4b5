// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`runner`] defines the [`CommandRunner`] trait and [`CommandOutput`].
//! - [`shell`] provides [`ShellRunner`], the production implementation on
//!   top of `tokio::process::Command`.

pub mod runner;
pub mod shell;

pub use runner::{CommandOutput, CommandRunner, RunFuture};
pub use shell::ShellRunner;
