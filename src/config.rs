//! Storage configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the persistence facade
///
/// The enable switches model which backends the hosting build actually
/// ships: a managed build may only carry the async store, a bare native
/// build only the native one. With no durable backend enabled (or no data
/// directory at all) the facade falls back to the in-memory map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding durable snapshots; `None` disables both durable backends
    pub data_dir: Option<PathBuf>,

    /// Allow the durable asynchronous file backend
    pub async_file: bool,

    /// Allow the durable native (synchronous) file backend
    pub native_file: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            data_dir: Some(PathBuf::from("data")),
            async_file: true,
            native_file: true,
        }
    }
}

impl StorageConfig {
    /// Config with no durable backend at all (ephemeral only)
    pub fn ephemeral() -> Self {
        StorageConfig {
            data_dir: None,
            ..Default::default()
        }
    }

    /// Config with durable snapshots rooted at the given directory
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        StorageConfig {
            data_dir: Some(dir.into()),
            ..Default::default()
        }
    }
}
