//! Batch generation orchestrator.
//!
//! This crate drives batches of generation tasks against an injected
//! [`AvatarTransformer`](crafter_transform::AvatarTransformer): it creates a
//! batch of N tasks from one source image and one parameter snapshot, staggers
//! their dispatch, tracks each task through its
//! idle/loading/success/error lifecycle, supports per-task cancel and retry,
//! and persists successful results to an injected
//! [`HistoryStore`](crafter_history::HistoryStore).
//!
//! Observers read immutable [`OrchestratorSnapshot`] values through a watch
//! channel; they never mutate task state directly.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod batch;
mod orchestrator;
mod task;

pub use batch::{BatchAdvisory, GenerationBatch};
pub use orchestrator::{BatchOrchestrator, DISPATCH_STAGGER, OrchestratorSnapshot};
pub use task::GenerationTask;
