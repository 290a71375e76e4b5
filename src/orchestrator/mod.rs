// src/orchestrator/mod.rs

//! Run one [`BranchTask`](crate::task::BranchTask) per branch and report.
//!
//! - [`run`] launches the tasks with a staggered start and joins them.
//! - [`report`] renders the per-branch blocks and the summary text.

pub mod report;
pub mod run;

pub use report::{ReportStyle, render_report, ticket_template};
pub use run::{Orchestrator, OrchestratorOptions};
