//! Integration tests for the model catalogue.
//!
//! Tests cover:
//! - Registering weights files under managed versioned names
//! - Lookup by name/version and keyword search
//! - Deletion with and without removing the weights file
//! - Metadata export

mod common;

use std::fs;

use aquadetect::core::models::ModelStore;
use common::*;
use tempfile::TempDir;

async fn store_with_dirs() -> (ModelStore, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let db = test_db().await;
    let store = ModelStore::new(db, dir.path().join("models"));
    (store, dir)
}

#[tokio::test]
async fn test_add_model_copies_weights() -> anyhow::Result<()> {
    let (store, dir) = store_with_dirs().await;
    let source = write_fake_weights(dir.path(), "scratch.pt");

    let record = store
        .add_model(
            &source,
            "reefnet",
            "1.0",
            vec!["fish".to_string(), "coral".to_string()],
            Some("baseline".to_string()),
            None,
        )
        .await?;

    assert_eq!(record.name, "reefnet");
    assert_eq!(record.version, "1.0");
    assert!(record.file_path.ends_with("reefnet_v1.0.pt"));
    assert!(record.file_path.is_file());
    assert_eq!(fs::read(&record.file_path)?, b"fake-weights");
    // The source file is untouched.
    assert!(source.is_file());
    Ok(())
}

#[tokio::test]
async fn test_add_model_rejects_duplicates_and_missing_source() -> anyhow::Result<()> {
    let (store, dir) = store_with_dirs().await;
    let source = write_fake_weights(dir.path(), "scratch.pt");

    store
        .add_model(&source, "reefnet", "1.0", vec![], None, None)
        .await?;
    let duplicate = store
        .add_model(&source, "reefnet", "1.0", vec![], None, None)
        .await;
    assert!(duplicate.is_err(), "same name and version should be rejected");

    let missing = store
        .add_model(dir.path().join("nope.pt").as_path(), "other", "1.0", vec![], None, None)
        .await;
    assert!(missing.is_err(), "missing source file should be rejected");
    Ok(())
}

#[tokio::test]
async fn test_find_model_latest_version() -> anyhow::Result<()> {
    let (store, dir) = store_with_dirs().await;
    let source = write_fake_weights(dir.path(), "scratch.pt");

    store.add_model(&source, "reefnet", "1.0", vec![], None, None).await?;
    store.add_model(&source, "reefnet", "2.0", vec![], None, None).await?;

    let latest = store.find_model("reefnet", None).await?;
    assert_eq!(latest.map(|m| m.version), Some("2.0".to_string()));

    let pinned = store.find_model("reefnet", Some("1.0")).await?;
    assert_eq!(pinned.map(|m| m.version), Some("1.0".to_string()));

    assert!(store.find_model("ghost", None).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_search_matches_name_and_description() -> anyhow::Result<()> {
    let (store, dir) = store_with_dirs().await;
    let source = write_fake_weights(dir.path(), "scratch.pt");

    store
        .add_model(&source, "reefnet", "1.0", vec![], Some("coral specialist".to_string()), None)
        .await?;
    store
        .add_model(&source, "deepscan", "1.0", vec![], None, None)
        .await?;

    assert_eq!(store.search("reef").await?.len(), 1);
    assert_eq!(store.search("coral").await?.len(), 1);
    assert_eq!(store.search("net").await?.len(), 1);
    assert_eq!(store.search("zzz").await?.len(), 0);
    Ok(())
}

#[tokio::test]
async fn test_delete_model_with_and_without_file() -> anyhow::Result<()> {
    let (store, dir) = store_with_dirs().await;
    let source = write_fake_weights(dir.path(), "scratch.pt");

    let keep = store.add_model(&source, "keeper", "1.0", vec![], None, None).await?;
    let kept_path = keep.file_path.clone();
    store.delete_model(keep, false).await?;
    assert!(kept_path.is_file(), "weights should survive a catalogue-only delete");
    assert!(store.find_model("keeper", None).await?.is_none());

    let gone = store.add_model(&source, "goner", "1.0", vec![], None, None).await?;
    let gone_path = gone.file_path.clone();
    store.delete_model(gone, true).await?;
    assert!(!gone_path.exists());
    Ok(())
}

#[tokio::test]
async fn test_export_model_info() -> anyhow::Result<()> {
    let (store, dir) = store_with_dirs().await;
    let source = write_fake_weights(dir.path(), "scratch.pt");

    let record = store
        .add_model(
            &source,
            "reefnet",
            "1.0",
            vec!["fish".to_string()],
            Some("baseline".to_string()),
            Some("marina".to_string()),
        )
        .await?;

    let dest = dir.path().join("info.json");
    store.export_model_info(&record, &dest)?;

    let parsed: serde_json::Value = serde_json::from_str(&fs::read_to_string(&dest)?)?;
    assert_eq!(parsed["name"], "reefnet");
    assert_eq!(parsed["version"], "1.0");
    assert_eq!(parsed["classes"][0], "fish");
    assert_eq!(parsed["author"], "marina");
    Ok(())
}
