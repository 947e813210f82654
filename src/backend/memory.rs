//! Ephemeral in-memory backend
//!
//! The last-resort fallback: always constructible, contents lost when the
//! process exits. Callers relying on persistence get none here, which is
//! exactly the degraded mode the facade accepts when no durable backend
//! is available.

use super::{BackendKind, StorageBackend};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-process key-value map with no persistence guarantee
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        MemoryStore {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageBackend for MemoryStore {
    fn kind(&self) -> BackendKind {
        BackendKind::Memory
    }

    async fn write(&self, key: &str, raw: String) -> anyhow::Result<()> {
        self.entries.lock().unwrap().insert(key.to_owned(), raw);
        Ok(())
    }

    async fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_basic_write_read() {
        let store = MemoryStore::new();
        store.write("key1", "\"value1\"".to_string()).await.unwrap();

        let raw = store.read("key1").await.unwrap();
        assert_eq!(raw.as_deref(), Some("\"value1\""));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_overwrite() {
        let store = MemoryStore::new();
        store.write("key1", "1".to_string()).await.unwrap();
        store.write("key1", "2".to_string()).await.unwrap();

        assert_eq!(store.read("key1").await.unwrap().as_deref(), Some("2"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryStore::new();
        store.write("key1", "1".to_string()).await.unwrap();

        store.delete("key1").await.unwrap();
        assert!(store.read("key1").await.unwrap().is_none());
        assert!(store.is_empty());

        // Deleting an absent key is a no-op
        store.delete("key1").await.unwrap();
    }

    #[tokio::test]
    async fn test_kind() {
        assert_eq!(MemoryStore::new().kind(), BackendKind::Memory);
    }
}
