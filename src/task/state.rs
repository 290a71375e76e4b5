// src/task/state.rs

use crate::errors::BranchError;

/// Lifecycle of a branch task.
///
/// `Created → CheckedOut → Completed` or
/// `Created → CheckoutFailed → Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Created,
    CheckedOut,
    CheckoutFailed,
    Completed,
}

impl TaskState {
    /// Whether `self → next` is a legal transition.
    pub fn can_transition_to(self, next: TaskState) -> bool {
        matches!(
            (self, next),
            (TaskState::Created, TaskState::CheckedOut)
                | (TaskState::Created, TaskState::CheckoutFailed)
                | (TaskState::CheckedOut, TaskState::Completed)
                | (TaskState::CheckoutFailed, TaskState::Completed)
        )
    }
}

/// Final result of one branch task as seen by the orchestrator.
///
/// Command output itself lives in the [`ResultSink`](crate::sink::ResultSink).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReport {
    pub branch: String,
    pub checked_out: bool,
    pub outcome: Result<(), BranchError>,
}

impl TaskReport {
    pub fn succeeded(&self) -> bool {
        self.outcome.is_ok()
    }
}
