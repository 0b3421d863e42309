//! Crafter: batch avatar generation with a durable local history.
//!
//! This facade crate re-exports the public surface of the workspace:
//! - [`BatchOrchestrator`] drives batches of generation tasks
//! - [`AvatarTransformer`] / [`GeminiTransformer`] is the external service
//!   boundary
//! - [`HistoryStore`] / [`FileSystemHistory`] persists completed results
//! - [`config::CrafterConfig`] layers bundled defaults with user overrides

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;

pub use crafter_batch::{
    BatchAdvisory, BatchOrchestrator, DISPATCH_STAGGER, GenerationBatch, GenerationTask,
    OrchestratorSnapshot,
};
pub use crafter_core::{
    Accessory, AvatarStyle, Background, BatchId, Clothing, GeneratedArt, GenerationParams,
    GenerationParamsBuilder, ImageData, TaskId, TaskStatus,
};
pub use crafter_error::{
    BuilderError, BuilderErrorKind, ConfigError, CrafterError, CrafterErrorKind, CrafterResult,
    FailureKind, HistoryError, HistoryErrorKind, TransformError, TransformErrorKind,
};
pub use crafter_history::{FileSystemHistory, HistoryItem, HistoryStore, MemoryHistory};
pub use crafter_transform::{
    AvatarTransformer, DEFAULT_ENDPOINT, DEFAULT_MODEL, GeminiTransformer, build_prompt,
};
