// src/task/mod.rs

//! Per-branch task execution.
//!
//! A [`BranchTask`] runs once per branch as a two-phase state machine:
//! checkout, then the body of the selected [`Mode`]. A failed checkout goes
//! straight to `Completed` and the body never runs.
//!
//! - [`mode`]: the closed set of task bodies.
//! - [`state`]: task states and the final [`TaskReport`].
//! - [`context`]: collaborators shared by every task of a run.
//! - [`branch_task`]: the state machine itself.

pub mod branch_task;
pub mod context;
pub mod mode;
pub mod state;

pub use branch_task::{BranchTask, format_build_url};
pub use context::TaskContext;
pub use mode::Mode;
pub use state::{TaskReport, TaskState};
