//! Tests for the filesystem history backend.

use crafter_core::{GeneratedArt, ImageData};
use crafter_history::{FileSystemHistory, HistoryStore};
use tempfile::TempDir;
use uuid::Uuid;

fn art(tag: &str) -> GeneratedArt {
    GeneratedArt::new(
        ImageData::from_bytes("image/png", tag.as_bytes()),
        tag,
        format!("{} description", tag),
    )
}

#[tokio::test]
async fn add_and_list_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemHistory::new(temp_dir.path()).unwrap();

    let item = store.add(&art("gilded")).await.unwrap();

    let all = store.get_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, item.id);
    assert_eq!(all[0].theme, "gilded");
    assert_eq!(all[0].description, "gilded description");
    assert_eq!(all[0].image, art("gilded").image);
}

#[tokio::test]
async fn lists_newest_first_after_interleaved_operations() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemHistory::new(temp_dir.path()).unwrap();

    let a = store.add(&art("a")).await.unwrap();
    let b = store.add(&art("b")).await.unwrap();
    store.delete(a.id).await.unwrap();
    let c = store.add(&art("c")).await.unwrap();
    let d = store.add(&art("d")).await.unwrap();
    store.delete(c.id).await.unwrap();

    let all = store.get_all().await.unwrap();
    let ids: Vec<Uuid> = all.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![d.id, b.id]);
    for pair in all.windows(2) {
        assert!(pair[0].timestamp >= pair[1].timestamp);
    }
}

#[tokio::test]
async fn delete_unknown_id_is_a_no_op() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemHistory::new(temp_dir.path()).unwrap();

    store.delete(Uuid::new_v4()).await.unwrap();

    let item = store.add(&art("kept")).await.unwrap();
    store.delete(Uuid::new_v4()).await.unwrap();
    assert_eq!(store.get_all().await.unwrap()[0].id, item.id);
}

#[tokio::test]
async fn clear_empty_store_is_a_no_op() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemHistory::new(temp_dir.path()).unwrap();

    store.clear().await.unwrap();
    assert!(store.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn clear_removes_every_record() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemHistory::new(temp_dir.path()).unwrap();

    for tag in ["x", "y", "z"] {
        store.add(&art(tag)).await.unwrap();
    }
    store.clear().await.unwrap();
    assert!(store.get_all().await.unwrap().is_empty());

    // Clearing twice stays fine.
    store.clear().await.unwrap();
}

#[tokio::test]
async fn records_survive_reopening_the_store() {
    let temp_dir = TempDir::new().unwrap();

    let first = {
        let store = FileSystemHistory::new(temp_dir.path()).unwrap();
        store.add(&art("durable")).await.unwrap()
    };

    let reopened = FileSystemHistory::new(temp_dir.path()).unwrap();
    let all = reopened.get_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], first);
}

#[tokio::test]
async fn unreadable_records_are_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemHistory::new(temp_dir.path()).unwrap();

    let kept = store.add(&art("kept")).await.unwrap();
    tokio::fs::write(temp_dir.path().join("corrupt.json"), "not json")
        .await
        .unwrap();

    let all = store.get_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, kept.id);
}

#[tokio::test]
async fn concurrent_adds_each_persist() {
    let temp_dir = TempDir::new().unwrap();
    let store = std::sync::Arc::new(FileSystemHistory::new(temp_dir.path()).unwrap());

    let handles: Vec<_> = (0..5)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move { store.add(&art(&format!("piece-{}", i))).await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(store.get_all().await.unwrap().len(), 5);
}
