//! In-memory history backend for tests and ephemeral sessions.

use crate::{HistoryItem, HistoryStore, sort_newest_first};
use crafter_core::GeneratedArt;
use crafter_error::CrafterResult;
use std::sync::Mutex;
use uuid::Uuid;

/// History backend keeping records in process memory only.
#[derive(Debug, Default)]
pub struct MemoryHistory {
    items: Mutex<Vec<HistoryItem>>,
}

impl MemoryHistory {
    /// Create an empty in-memory history.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl HistoryStore for MemoryHistory {
    async fn add(&self, art: &GeneratedArt) -> CrafterResult<HistoryItem> {
        let item = HistoryItem::from_art(art);
        self.items.lock().unwrap().push(item.clone());
        Ok(item)
    }

    async fn get_all(&self) -> CrafterResult<Vec<HistoryItem>> {
        let mut items = self.items.lock().unwrap().clone();
        sort_newest_first(&mut items);
        Ok(items)
    }

    async fn delete(&self, id: Uuid) -> CrafterResult<()> {
        self.items.lock().unwrap().retain(|item| item.id != id);
        Ok(())
    }

    async fn clear(&self) -> CrafterResult<()> {
        self.items.lock().unwrap().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crafter_core::ImageData;

    fn art(tag: &str) -> GeneratedArt {
        GeneratedArt::new(
            ImageData::from_bytes("image/png", tag.as_bytes()),
            tag,
            format!("{} description", tag),
        )
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let store = MemoryHistory::new();
        let first = store.add(&art("first")).await.unwrap();
        let second = store.add(&art("second")).await.unwrap();

        let all = store.get_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].timestamp >= all[1].timestamp);
        assert_eq!(all.iter().filter(|i| i.id == first.id).count(), 1);
        assert_eq!(all.iter().filter(|i| i.id == second.id).count(), 1);
    }

    #[tokio::test]
    async fn delete_and_clear_are_idempotent() {
        let store = MemoryHistory::new();
        store.delete(Uuid::new_v4()).await.unwrap();
        store.clear().await.unwrap();

        let item = store.add(&art("only")).await.unwrap();
        store.delete(item.id).await.unwrap();
        store.delete(item.id).await.unwrap();
        assert!(store.get_all().await.unwrap().is_empty());
    }
}
