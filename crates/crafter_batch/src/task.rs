//! One unit of work within a generation batch.

use crafter_core::{GeneratedArt, TaskId, TaskStatus};

/// One generation task, tracked through its lifecycle.
///
/// The task carries a monotonic attempt counter. Every dispatch captures a
/// fresh counter value; a settling attempt may only apply its outcome while
/// its captured value is still current. Cancellation bumps the counter, so a
/// stale attempt can never overwrite the state of a later one.
///
/// Invariant: `result` and `error` are mutually exclusive, and both absent
/// unless the status is terminal.
#[derive(Debug, Clone)]
pub struct GenerationTask {
    id: TaskId,
    status: TaskStatus,
    result: Option<GeneratedArt>,
    error: Option<String>,
    attempt: u64,
}

impl GenerationTask {
    pub(crate) fn new() -> Self {
        Self {
            id: TaskId::new(),
            status: TaskStatus::Idle,
            result: None,
            error: None,
            attempt: 0,
        }
    }

    /// Identifier, stable across retries of this task.
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Current lifecycle status.
    pub fn status(&self) -> TaskStatus {
        self.status
    }

    /// The generated artwork. Present iff the status is `Success`.
    pub fn result(&self) -> Option<&GeneratedArt> {
        self.result.as_ref()
    }

    /// The user-facing failure message. Present iff the status is `Error`.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Begin a fresh attempt: transition to `Loading` and return the attempt
    /// token the settling code must present.
    pub(crate) fn begin_attempt(&mut self) -> u64 {
        self.attempt += 1;
        self.status = TaskStatus::Loading;
        self.result = None;
        self.error = None;
        self.attempt
    }

    /// Whether the given attempt token is still the live one.
    pub(crate) fn is_current(&self, token: u64) -> bool {
        self.attempt == token
    }

    /// Settle the live attempt with a result.
    pub(crate) fn complete(&mut self, art: GeneratedArt) {
        self.status = TaskStatus::Success;
        self.result = Some(art);
        self.error = None;
    }

    /// Settle the live attempt with a failure message.
    pub(crate) fn fail(&mut self, message: impl Into<String>) {
        self.status = TaskStatus::Error;
        self.result = None;
        self.error = Some(message.into());
    }

    /// Cancel the live attempt: invalidate its token and reset to `Idle`.
    pub(crate) fn reset(&mut self) {
        self.attempt += 1;
        self.status = TaskStatus::Idle;
        self.result = None;
        self.error = None;
    }
}
