//! Storage backend module
//!
//! Defines the `StorageBackend` trait and the concrete variants the facade
//! selects among at startup. Backends move already-encoded text; value
//! (de)serialization belongs to the facade (loose coupling).

mod async_file;
mod memory;
mod native_file;

pub use async_file::AsyncFileStore;
pub use memory::MemoryStore;
pub use native_file::NativeFileStore;

use async_trait::async_trait;
use std::fmt;

/// Identifies which backend variant a facade selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Durable snapshot file with an asynchronous API
    AsyncFile,
    /// Durable snapshot file with a synchronous API
    NativeFile,
    /// In-process map, no persistence
    Memory,
}

impl BackendKind {
    /// Backend name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            BackendKind::AsyncFile => "async-file",
            BackendKind::NativeFile => "native-file",
            BackendKind::Memory => "memory",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Uniform capability implemented by every backend variant
///
/// The facade holds exactly one backend behind this trait for its whole
/// lifetime. Keys are caller-supplied identifier strings; values are the
/// facade's JSON text encoding.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Which variant this is
    fn kind(&self) -> BackendKind;

    /// Store `raw` under `key`, overwriting any prior value
    async fn write(&self, key: &str, raw: String) -> anyhow::Result<()>;

    /// Fetch the raw text stored under `key`, if any
    async fn read(&self, key: &str) -> anyhow::Result<Option<String>>;

    /// Delete the entry under `key`; no-op when absent
    async fn delete(&self, key: &str) -> anyhow::Result<()>;
}
