//! Key-value persistence facade
//!
//! The single abstraction point through which all persistence flows. Picks a
//! backend once at construction, hides which one is active, and never
//! surfaces backend failures to the caller: writes and deletes are
//! best-effort, reads degrade to "no value".

use crate::backend::{AsyncFileStore, BackendKind, MemoryStore, NativeFileStore, StorageBackend};
use crate::config::StorageConfig;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Persistence facade over the selected storage backend
///
/// Construct one instance at application startup and pass it (or a clone,
/// which shares the same backend) to whatever needs persistence. The backend
/// choice is fixed for the facade's lifetime.
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn StorageBackend>,
}

impl Storage {
    /// Select a backend and build the facade
    ///
    /// Candidates are tried in fixed priority order: the durable async file
    /// store, the durable native file store, then the in-memory map. The
    /// first one that constructs wins. A candidate that fails to open is
    /// skipped, not an error; the memory backend is the unconditional last
    /// resort, so this never fails.
    pub async fn open(config: &StorageConfig) -> Self {
        if let Some(dir) = &config.data_dir {
            if config.async_file {
                match AsyncFileStore::open(dir).await {
                    Ok(store) => {
                        info!("Storage backend: {}", BackendKind::AsyncFile);
                        return Storage {
                            backend: Arc::new(store),
                        };
                    }
                    Err(e) => warn!("Async file store unavailable: {:#}", e),
                }
            }
            if config.native_file {
                match NativeFileStore::open(dir) {
                    Ok(store) => {
                        info!("Storage backend: {}", BackendKind::NativeFile);
                        return Storage {
                            backend: Arc::new(store),
                        };
                    }
                    Err(e) => warn!("Native file store unavailable: {:#}", e),
                }
            }
        }

        info!("Storage backend: {} (no persistence)", BackendKind::Memory);
        Storage {
            backend: Arc::new(MemoryStore::new()),
        }
    }

    /// Which backend this facade selected
    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    /// Serialize `value` to JSON text and store it under `key`
    ///
    /// Best-effort: encoding and backend failures are logged and swallowed,
    /// so callers must not assume the write reached durable storage. An
    /// empty key is ignored.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) {
        if key.is_empty() {
            warn!("Ignoring set with empty key");
            return;
        }

        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to encode value for key '{}': {}", key, e);
                return;
            }
        };

        if let Err(e) = self.backend.write(key, raw).await {
            warn!(
                "{} write failed for key '{}': {:#}",
                self.backend.kind(),
                key,
                e
            );
        }
    }

    /// Fetch and decode the value stored under `key`
    ///
    /// Absent, unreadable and undecodable entries all come back as `None`;
    /// the caller cannot distinguish corruption from absence.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        if key.is_empty() {
            return None;
        }

        let raw = match self.backend.read(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(
                    "{} read failed for key '{}': {:#}",
                    self.backend.kind(),
                    key,
                    e
                );
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("Undecodable value at key '{}': {}", key, e);
                None
            }
        }
    }

    /// Delete the entry under `key`; no-op when absent
    ///
    /// Backend failures are logged and swallowed, like `set`.
    pub async fn remove(&self, key: &str) {
        if key.is_empty() {
            return;
        }

        if let Err(e) = self.backend.delete(key).await {
            warn!(
                "{} delete failed for key '{}': {:#}",
                self.backend.kind(),
                key,
                e
            );
        }
    }
}
