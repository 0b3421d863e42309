//! Task lifecycle status.

use serde::{Deserialize, Serialize};

/// Lifecycle status of one generation task.
///
/// Transitions are strictly `Idle -> Loading -> {Success | Error}`, or
/// `Idle -> Loading -> Idle` when an attempt is cancelled. A retried task
/// re-enters `Loading` from `Idle` or `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Created but not yet dispatched, or reset by cancellation
    Idle,
    /// An attempt is in flight
    Loading,
    /// The attempt settled with a result
    Success,
    /// The attempt settled with a failure
    Error,
}

impl TaskStatus {
    /// String representation for logs and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Idle => "idle",
            TaskStatus::Loading => "loading",
            TaskStatus::Success => "success",
            TaskStatus::Error => "error",
        }
    }

    /// Whether this status is terminal (the attempt has settled).
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Success | TaskStatus::Error)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
