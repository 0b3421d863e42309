//! The batch orchestrator: dispatch, cancel, retry, and state publication.

use crate::GenerationBatch;
use crafter_core::{BatchId, GeneratedArt, GenerationParams, ImageData, TaskStatus};
use crafter_error::{CrafterResult, FailureKind};
use crafter_history::HistoryStore;
use crafter_transform::AvatarTransformer;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, instrument, warn};

/// Fixed delay between dispatching consecutive tasks of one batch.
///
/// Tasks are dispatched in index order but never block on each other's
/// completion; the stagger only spreads the load placed on the external
/// service.
pub const DISPATCH_STAGGER: Duration = Duration::from_millis(350);

/// Immutable view of every batch the orchestrator currently tracks, in
/// creation order.
#[derive(Debug, Clone, Default)]
pub struct OrchestratorSnapshot {
    /// Batches in creation order
    pub batches: Vec<GenerationBatch>,
}

impl OrchestratorSnapshot {
    /// Find one batch by id.
    pub fn batch(&self, id: BatchId) -> Option<&GenerationBatch> {
        self.batches.iter().find(|b| b.id() == id)
    }
}

/// Drives batches of generation tasks against an injected transformer and
/// history store.
///
/// All mutation goes through the orchestrator's operations; observers
/// subscribe to snapshots and never touch task state. Cloning the
/// orchestrator yields another handle onto the same state.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use crafter_batch::BatchOrchestrator;
/// use crafter_core::{GenerationParams, ImageData};
/// use crafter_history::MemoryHistory;
/// use crafter_transform::GeminiTransformer;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let orchestrator = BatchOrchestrator::new(
///     Arc::new(GeminiTransformer::new()?),
///     Arc::new(MemoryHistory::new()),
/// );
///
/// let mut updates = orchestrator.subscribe();
/// let image = ImageData::from_bytes("image/png", &[0u8; 16]);
/// let batch_id = orchestrator.create_batch(image, GenerationParams::default());
///
/// while updates.changed().await.is_ok() {
///     let snapshot = updates.borrow().clone();
///     if snapshot.batch(batch_id).is_some_and(|b| b.is_settled()) {
///         break;
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct BatchOrchestrator {
    transformer: Arc<dyn AvatarTransformer>,
    history: Arc<dyn HistoryStore>,
    state: Arc<Mutex<Vec<GenerationBatch>>>,
    updates: Arc<watch::Sender<OrchestratorSnapshot>>,
}

impl std::fmt::Debug for BatchOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let batch_count = self.state.lock().unwrap().len();
        f.debug_struct("BatchOrchestrator")
            .field("provider", &self.transformer.provider_name())
            .field("batches", &batch_count)
            .finish_non_exhaustive()
    }
}

impl BatchOrchestrator {
    /// Create a new orchestrator with injected collaborators.
    pub fn new(transformer: Arc<dyn AvatarTransformer>, history: Arc<dyn HistoryStore>) -> Self {
        let (updates, _) = watch::channel(OrchestratorSnapshot::default());
        Self {
            transformer,
            history,
            state: Arc::new(Mutex::new(Vec::new())),
            updates: Arc::new(updates),
        }
    }

    /// Subscribe to state snapshots. A fresh snapshot is published after
    /// every observable mutation.
    pub fn subscribe(&self) -> watch::Receiver<OrchestratorSnapshot> {
        self.updates.subscribe()
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> OrchestratorSnapshot {
        self.updates.borrow().clone()
    }

    /// Create a batch of `params.quantity` idle tasks and begin staggered
    /// dispatch.
    ///
    /// The batch is observable in its all-idle state before any network
    /// activity starts.
    #[instrument(skip(self, image, params), fields(quantity = params.quantity))]
    pub fn create_batch(&self, image: ImageData, params: GenerationParams) -> BatchId {
        let batch = GenerationBatch::new(image, params);
        let batch_id = batch.id();
        let quantity = batch.tasks().len();

        {
            let mut state = self.state.lock().unwrap();
            state.push(batch);
            self.publish(&state);
        }
        debug!(batch = %batch_id, quantity, "Created batch");

        let orchestrator = self.clone();
        tokio::spawn(async move {
            for index in 0..quantity {
                if index > 0 {
                    tokio::time::sleep(DISPATCH_STAGGER).await;
                }
                orchestrator.dispatch(batch_id, index);
            }
        });

        batch_id
    }

    /// Dispatch one task: transition it to `Loading` and start a generation
    /// attempt. Fire-and-forget; the outcome lands through the snapshot
    /// stream.
    ///
    /// No-op when the task is already loading or has already succeeded.
    #[instrument(skip(self, batch_id), fields(batch = %batch_id))]
    pub fn dispatch(&self, batch_id: BatchId, index: usize) {
        let (token, image, params, total) = {
            let mut state = self.state.lock().unwrap();
            let Some(batch) = state.iter_mut().find(|b| b.id() == batch_id) else {
                warn!("Dispatch for unknown batch");
                return;
            };
            let total = batch.tasks().len();
            let Some(task) = batch.task_mut(index) else {
                warn!("Dispatch for unknown task index");
                return;
            };
            match task.status() {
                TaskStatus::Idle | TaskStatus::Error => {}
                status => {
                    debug!(%status, "Task not dispatchable, ignoring");
                    return;
                }
            }

            let token = task.begin_attempt();
            batch.clear_advisory();
            let image = batch.image().clone();
            let params = batch.params().clone();
            self.publish(&state);
            (token, image, params, total)
        };
        debug!(token, "Task loading");

        let orchestrator = self.clone();
        tokio::spawn(async move {
            let outcome = orchestrator
                .transformer
                .transform(&image, &params, index, total)
                .await;
            orchestrator.settle(batch_id, index, token, outcome).await;
        });
    }

    /// Cancel a loading task: invalidate its live attempt and reset it to
    /// `Idle` immediately.
    ///
    /// The in-flight call is not aborted; its eventual outcome is discarded
    /// when it presents a stale attempt token. No-op when the task is not
    /// loading.
    #[instrument(skip(self, batch_id), fields(batch = %batch_id))]
    pub fn cancel(&self, batch_id: BatchId, index: usize) {
        let mut state = self.state.lock().unwrap();
        let Some(batch) = state.iter_mut().find(|b| b.id() == batch_id) else {
            warn!("Cancel for unknown batch");
            return;
        };
        let Some(task) = batch.task_mut(index) else {
            warn!("Cancel for unknown task index");
            return;
        };
        if task.status() != TaskStatus::Loading {
            debug!(status = %task.status(), "Cancel on non-loading task, ignoring");
            return;
        }

        task.reset();
        debug!("Task cancelled");
        self.publish(&state);
    }

    /// Retry a task that was cancelled (`Idle`) or failed (`Error`). The
    /// task keeps its identifier; the retry runs under a fresh attempt token
    /// against the same batch image and params.
    #[instrument(skip(self, batch_id), fields(batch = %batch_id))]
    pub fn retry(&self, batch_id: BatchId, index: usize) {
        {
            let state = self.state.lock().unwrap();
            let Some(task) = state
                .iter()
                .find(|b| b.id() == batch_id)
                .and_then(|b| b.task(index))
            else {
                warn!("Retry for unknown batch or task");
                return;
            };
            match task.status() {
                TaskStatus::Idle | TaskStatus::Error => {}
                status => {
                    debug!(%status, "Retry on non-retryable task, ignoring");
                    return;
                }
            }
        }
        self.dispatch(batch_id, index);
    }

    /// Apply a settled attempt to task state, then persist a success to the
    /// history store.
    ///
    /// An attempt presenting a stale token finds its task already cancelled
    /// or superseded and leaves every state untouched.
    async fn settle(
        &self,
        batch_id: BatchId,
        index: usize,
        token: u64,
        outcome: CrafterResult<GeneratedArt>,
    ) {
        let persisted = {
            let mut state = self.state.lock().unwrap();
            let Some(batch) = state.iter_mut().find(|b| b.id() == batch_id) else {
                return;
            };
            let Some(task) = batch.task_mut(index) else {
                return;
            };
            if !task.is_current(token) || task.status() != TaskStatus::Loading {
                debug!(token, "Stale attempt settled, discarding outcome");
                return;
            }

            let persisted = match outcome {
                Ok(art) => {
                    task.complete(art.clone());
                    debug!(token, "Task succeeded");
                    Some(art)
                }
                Err(err) => {
                    let failure = FailureKind::from(&err);
                    warn!(error = %err, %failure, "Generation attempt failed");
                    task.fail(failure.user_message());
                    None
                }
            };

            batch.record_settlement();
            self.publish(&state);
            persisted
        };

        // History writes stay outside the lock; each save is independent and
        // a storage failure must not disturb the task's settled state.
        if let Some(art) = persisted {
            if let Err(err) = self.history.add(&art).await {
                warn!(error = %err, "Failed to persist generated art to history");
            }
        }
    }

    fn publish(&self, state: &[GenerationBatch]) {
        self.updates.send_replace(OrchestratorSnapshot {
            batches: state.to_vec(),
        });
    }
}
