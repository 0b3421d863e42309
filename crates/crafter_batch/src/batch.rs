//! A group of generation tasks sharing one source image and one parameter
//! snapshot.

use crate::GenerationTask;
use chrono::{DateTime, Utc};
use crafter_core::{BatchId, GenerationParams, ImageData, TaskStatus};

/// Batch-level advisory surfaced when a batch settles badly.
///
/// This is advice for the presentation layer, not a hard error: partial
/// success leaves succeeded tasks intact and raises nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchAdvisory {
    /// Every task in the batch settled and none succeeded
    AllFailed,
}

impl std::fmt::Display for BatchAdvisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchAdvisory::AllFailed => {
                write!(f, "No items succeeded. Retry individual items or start over.")
            }
        }
    }
}

/// A batch of generation tasks.
///
/// Task order is the presentation order, fixed at creation. The orchestrator
/// owns the batch for its active lifetime; observers only see clones inside
/// snapshots.
#[derive(Debug, Clone)]
pub struct GenerationBatch {
    id: BatchId,
    created_at: DateTime<Utc>,
    image: ImageData,
    params: GenerationParams,
    tasks: Vec<GenerationTask>,
    advisory: Option<BatchAdvisory>,
}

impl GenerationBatch {
    pub(crate) fn new(image: ImageData, params: GenerationParams) -> Self {
        let tasks = (0..params.quantity).map(|_| GenerationTask::new()).collect();
        Self {
            id: BatchId::new(),
            created_at: Utc::now(),
            image,
            params,
            tasks,
            advisory: None,
        }
    }

    /// Batch identifier, never reused.
    pub fn id(&self) -> BatchId {
        self.id
    }

    /// When the batch was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The source image every task transforms.
    pub fn image(&self) -> &ImageData {
        &self.image
    }

    /// The parameter snapshot captured at creation.
    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    /// Tasks in presentation order.
    pub fn tasks(&self) -> &[GenerationTask] {
        &self.tasks
    }

    /// One task by its index, if the index is in range.
    pub fn task(&self, index: usize) -> Option<&GenerationTask> {
        self.tasks.get(index)
    }

    /// The advisory, present only once the batch has settled with zero
    /// successes.
    pub fn advisory(&self) -> Option<BatchAdvisory> {
        self.advisory
    }

    /// Whether any task is currently loading.
    pub fn is_loading(&self) -> bool {
        self.tasks
            .iter()
            .any(|t| t.status() == TaskStatus::Loading)
    }

    /// Number of tasks that have settled (success or error).
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.status().is_terminal()).count()
    }

    /// Number of tasks that settled successfully.
    pub fn success_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.status() == TaskStatus::Success)
            .count()
    }

    /// Whether every task has settled.
    pub fn is_settled(&self) -> bool {
        self.completed_count() == self.tasks.len()
    }

    pub(crate) fn task_mut(&mut self, index: usize) -> Option<&mut GenerationTask> {
        self.tasks.get_mut(index)
    }

    /// Called after a task settles. Raises the advisory exactly once, and
    /// only when the whole batch has settled without a single success.
    pub(crate) fn record_settlement(&mut self) {
        if self.advisory.is_none() && self.is_settled() && self.success_count() == 0 {
            self.advisory = Some(BatchAdvisory::AllFailed);
        }
    }

    /// Called when a task re-enters the loading state; a reopened batch has
    /// no settled verdict yet.
    pub(crate) fn clear_advisory(&mut self) {
        self.advisory = None;
    }
}
