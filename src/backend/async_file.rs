//! Durable asynchronous backend
//!
//! Keeps the full key-value map in memory and mirrors it to a JSON snapshot
//! file through `tokio::fs`. Every mutation rewrites the snapshot via a temp
//! file followed by a rename, so a crash mid-write leaves the previous
//! snapshot intact.

use super::{BackendKind, StorageBackend};
use anyhow::Context;
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

/// Snapshot file name inside the data directory
pub(super) const SNAPSHOT_FILE: &str = "sessionkv.async.json";

/// Durable key-value store with an asynchronous API
///
/// Highest-priority backend. Constructible only when the data directory can
/// be created and the existing snapshot, if any, parses.
pub struct AsyncFileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl AsyncFileStore {
    /// Open the store inside `dir`, loading the snapshot when present
    pub async fn open(dir: &Path) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("cannot create data directory {:?}", dir))?;

        let path = dir.join(SNAPSHOT_FILE);
        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(text) => serde_json::from_str(&text)
                .with_context(|| format!("corrupt snapshot {:?}", path))?,
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                return Err(e).with_context(|| format!("cannot read snapshot {:?}", path))
            }
        };

        debug!("Opened async file store at {:?}", path);
        Ok(AsyncFileStore {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Rewrite the snapshot to match `entries`
    async fn persist(&self, entries: &HashMap<String, String>) -> anyhow::Result<()> {
        let text = serde_json::to_string(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, text).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl StorageBackend for AsyncFileStore {
    fn kind(&self) -> BackendKind {
        BackendKind::AsyncFile
    }

    async fn write(&self, key: &str, raw: String) -> anyhow::Result<()> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_owned(), raw);
        self.persist(&entries).await
    }

    async fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        let mut entries = self.entries.lock().await;
        if entries.remove(key).is_some() {
            self.persist(&entries).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[tokio::test]
    async fn test_write_survives_reopen() {
        let dir = temp_dir("sessionkv_test_async_reopen");

        let store = AsyncFileStore::open(&dir).await.unwrap();
        store
            .write("currentUser", "{\"uid\":\"u1\"}".to_string())
            .await
            .unwrap();
        drop(store);

        let store = AsyncFileStore::open(&dir).await.unwrap();
        let raw = store.read("currentUser").await.unwrap();
        assert_eq!(raw.as_deref(), Some("{\"uid\":\"u1\"}"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_delete_survives_reopen() {
        let dir = temp_dir("sessionkv_test_async_delete");

        let store = AsyncFileStore::open(&dir).await.unwrap();
        store.write("k", "1".to_string()).await.unwrap();
        store.delete("k").await.unwrap();
        drop(store);

        let store = AsyncFileStore::open(&dir).await.unwrap();
        assert!(store.read("k").await.unwrap().is_none());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_fails_open() {
        let dir = temp_dir("sessionkv_test_async_corrupt");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(SNAPSHOT_FILE), "not json at all").unwrap();

        assert!(AsyncFileStore::open(&dir).await.is_err());

        fs::remove_dir_all(&dir).unwrap();
    }
}
