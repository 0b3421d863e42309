//! Durable local history of generated avatars.
//!
//! This crate provides pluggable storage backends for the records a user has
//! generated: [`FileSystemHistory`] persists one JSON record per item under a
//! directory and survives process restart; [`MemoryHistory`] backs tests and
//! ephemeral sessions.
//!
//! Records are append-mostly: they are created from successful generation
//! results, never mutated, and removed only by explicit user action. Listing
//! is always produced fresh, newest first.
//!
//! # Example
//!
//! ```no_run
//! use crafter_core::{GeneratedArt, ImageData};
//! use crafter_history::{FileSystemHistory, HistoryStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FileSystemHistory::new("/tmp/crafter-history")?;
//!
//! let art = GeneratedArt::new(
//!     ImageData::from_bytes("image/png", &[0u8; 16]),
//!     "Neon Menagerie",
//!     "Electric beasts in candy chrome.",
//! );
//! let item = store.add(&art).await?;
//!
//! let all = store.get_all().await?;
//! assert_eq!(all.first().map(|i| i.id), Some(item.id));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod memory;

pub use crafter_error::{HistoryError, HistoryErrorKind};
pub use filesystem::FileSystemHistory;
pub use memory::MemoryHistory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crafter_core::{GeneratedArt, ImageData};
use crafter_error::CrafterResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted generation record.
///
/// Created only from a successful generation result and never mutated after
/// creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    /// Unique record identifier
    pub id: Uuid,
    /// When the record was persisted
    pub timestamp: DateTime<Utc>,
    /// The generated image
    pub image: ImageData,
    /// Theme name of the series the piece belongs to
    pub theme: String,
    /// One-sentence design description
    pub description: String,
}

impl HistoryItem {
    /// Build a fresh record from a generation result.
    pub fn from_art(art: &GeneratedArt) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            image: art.image.clone(),
            theme: art.theme.clone(),
            description: art.description.clone(),
        }
    }
}

/// Trait for pluggable history storage backends.
///
/// `add` must be safe to call concurrently for independent results: backends
/// key each record by its own identifier and share no mutable cursor.
/// `delete` and `clear` are idempotent; removing a record that does not exist
/// is a no-op, not an error.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Persist a generation result as a fresh record.
    async fn add(&self, art: &GeneratedArt) -> CrafterResult<HistoryItem>;

    /// List every record, newest first. Produced fresh on each call.
    async fn get_all(&self) -> CrafterResult<Vec<HistoryItem>>;

    /// Remove one record by id. No-op when the id is unknown.
    async fn delete(&self, id: Uuid) -> CrafterResult<()>;

    /// Remove every record. No-op when the store is already empty.
    async fn clear(&self) -> CrafterResult<()>;
}

/// Order records newest first, with the id as a deterministic tiebreak.
pub(crate) fn sort_newest_first(items: &mut [HistoryItem]) {
    items.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| b.id.cmp(&a.id))
    });
}
