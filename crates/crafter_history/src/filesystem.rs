//! Filesystem-based history backend.
//!
//! Each record lives in its own `{id}.json` file under the base directory, so
//! concurrent `add` calls never contend on a shared file. Listings are read
//! fresh from the directory on every call.

use crate::{HistoryItem, HistoryStore, sort_newest_first};
use crafter_core::GeneratedArt;
use crafter_error::{CrafterResult, HistoryError, HistoryErrorKind};
use std::path::PathBuf;
use uuid::Uuid;

/// History backend storing one pretty-printed JSON record per item.
pub struct FileSystemHistory {
    base_path: PathBuf,
}

impl FileSystemHistory {
    /// Create a new filesystem history backend.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or accessed.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> CrafterResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            HistoryError::new(HistoryErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Opened filesystem history");
        Ok(Self { base_path })
    }

    fn record_path(&self, id: Uuid) -> PathBuf {
        self.base_path.join(format!("{}.json", id))
    }
}

#[async_trait::async_trait]
impl HistoryStore for FileSystemHistory {
    #[tracing::instrument(skip(self, art), fields(theme = %art.theme))]
    async fn add(&self, art: &GeneratedArt) -> CrafterResult<HistoryItem> {
        let item = HistoryItem::from_art(art);
        let path = self.record_path(item.id);

        let contents = serde_json::to_string_pretty(&item)
            .map_err(|e| HistoryError::new(HistoryErrorKind::Serialize(e.to_string())))?;

        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, contents).await.map_err(|e| {
            HistoryError::new(HistoryErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            HistoryError::new(HistoryErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::info!(id = %item.id, path = %path.display(), "Persisted history record");
        Ok(item)
    }

    #[tracing::instrument(skip(self))]
    async fn get_all(&self) -> CrafterResult<Vec<HistoryItem>> {
        let mut entries = match tokio::fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(HistoryError::new(HistoryErrorKind::FileRead(format!(
                    "{}: {}",
                    self.base_path.display(),
                    e
                )))
                .into());
            }
        };

        let mut items = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            HistoryError::new(HistoryErrorKind::FileRead(format!(
                "{}: {}",
                self.base_path.display(),
                e
            )))
        })? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let contents = tokio::fs::read_to_string(&path).await.map_err(|e| {
                HistoryError::new(HistoryErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            })?;

            match serde_json::from_str::<HistoryItem>(&contents) {
                Ok(item) => items.push(item),
                Err(e) => {
                    // A corrupt record should not hide the rest of the history.
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable history record");
                }
            }
        }

        sort_newest_first(&mut items);
        tracing::debug!(count = items.len(), "Listed history records");
        Ok(items)
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: Uuid) -> CrafterResult<()> {
        let path = self.record_path(id);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), "Deleted history record");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(HistoryError::new(HistoryErrorKind::FileWrite(format!(
                "delete {}: {}",
                path.display(),
                e
            )))
            .into()),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn clear(&self) -> CrafterResult<()> {
        let mut entries = match tokio::fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(HistoryError::new(HistoryErrorKind::FileRead(format!(
                    "{}: {}",
                    self.base_path.display(),
                    e
                )))
                .into());
            }
        };

        let mut removed = 0usize;
        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            HistoryError::new(HistoryErrorKind::FileRead(format!(
                "{}: {}",
                self.base_path.display(),
                e
            )))
        })? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match tokio::fs::remove_file(&path).await {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(HistoryError::new(HistoryErrorKind::FileWrite(format!(
                        "delete {}: {}",
                        path.display(),
                        e
                    )))
                    .into());
                }
            }
        }

        tracing::info!(removed, "Cleared history");
        Ok(())
    }
}
