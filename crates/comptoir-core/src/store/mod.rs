//! Key-value substrate.
//!
//! Every persisted value in Comptoir is a string under a string key, the way
//! a browser's local storage works. Sessions, user rows and the audit log are
//! JSON documents stored through this trait, so any backend that can hold
//! strings can host the whole auth core.

mod file;
mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{StoreBackend, StoreConfig};

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors raised by a store backend.
///
/// A store error always means the backend itself failed; it is never used to
/// signal a missing key.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing document could not be decoded.
    #[error("store data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The backend refused the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Asynchronous string key-value store.
///
/// Each individual call is atomic. Callers sequence multi-step operations by
/// awaiting each step before starting the next.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Delete a value. Deleting a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// All keys starting with `prefix`, in ascending order.
    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError>;
}

/// Open the backend selected by configuration.
pub async fn open_store(config: &StoreConfig) -> Result<Box<dyn KeyValueStore>, StoreError> {
    match config.backend {
        StoreBackend::Memory => Ok(Box::new(MemoryStore::new())),
        StoreBackend::File => Ok(Box::new(FileStore::open(&config.path).await?)),
    }
}
