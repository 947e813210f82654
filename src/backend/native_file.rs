//! Durable native backend
//!
//! Same snapshot contract as the async file store but built on synchronous
//! `std::fs` I/O, the shape of a native key-value store with a blocking API.
//! Uses its own file name so it never shares entries with the async store.

use super::{BackendKind, StorageBackend};
use anyhow::Context;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Snapshot file name inside the data directory
const SNAPSHOT_FILE: &str = "sessionkv.native.json";

/// Durable key-value store with a synchronous API
///
/// Second-priority backend, tried when the async store is unavailable.
pub struct NativeFileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl NativeFileStore {
    /// Open the store inside `dir`, loading the snapshot when present
    pub fn open(dir: &Path) -> anyhow::Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("cannot create data directory {:?}", dir))?;

        let path = dir.join(SNAPSHOT_FILE);
        let entries = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)
                .with_context(|| format!("corrupt snapshot {:?}", path))?,
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                return Err(e).with_context(|| format!("cannot read snapshot {:?}", path))
            }
        };

        debug!("Opened native file store at {:?}", path);
        Ok(NativeFileStore {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn persist(&self, entries: &HashMap<String, String>) -> anyhow::Result<()> {
        let text = serde_json::to_string(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[async_trait]
impl StorageBackend for NativeFileStore {
    fn kind(&self) -> BackendKind {
        BackendKind::NativeFile
    }

    async fn write(&self, key: &str, raw: String) -> anyhow::Result<()> {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.to_owned(), raw);
        self.persist(&entries)
    }

    async fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        let mut entries = self.entries.lock().unwrap();
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[tokio::test]
    async fn test_write_survives_reopen() {
        let dir = temp_dir("sessionkv_test_native_reopen");

        let store = NativeFileStore::open(&dir).unwrap();
        store
            .write("currentUser", "{\"uid\":\"u1\"}".to_string())
            .await
            .unwrap();
        drop(store);

        let store = NativeFileStore::open(&dir).unwrap();
        let raw = store.read("currentUser").await.unwrap();
        assert_eq!(raw.as_deref(), Some("{\"uid\":\"u1\"}"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_fails_open() {
        let dir = temp_dir("sessionkv_test_native_corrupt");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(SNAPSHOT_FILE), "{{{{").unwrap();

        assert!(NativeFileStore::open(&dir).is_err());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_distinct_snapshot_files() {
        // The two durable backends must never share a file
        assert_ne!(SNAPSHOT_FILE, super::super::async_file::SNAPSHOT_FILE);
    }
}
