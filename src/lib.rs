//! SessionKV - a key-value persistence facade with backend fallback
//!
//! SessionKV persists small values (the current user session, in practice)
//! across process restarts, selecting the best available storage backend at
//! startup and degrading gracefully to an in-memory map:
//! - Backends implement one small trait and are tried in fixed priority order
//! - Values are encoded as JSON text, so stored content stays inspectable
//! - Backend failures are logged and swallowed; callers never see an error

pub mod backend;
pub mod config;
pub mod session;
pub mod storage;

/// Re-export commonly used types
pub use backend::{BackendKind, StorageBackend};
pub use config::StorageConfig;
pub use session::{Session, CURRENT_SESSION_KEY};
pub use storage::Storage;
