//! Error types for the audit crate.

use comptoir_core::StoreError;
use thiserror::Error;

/// Errors that can occur during audit operations.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The underlying key-value store failed.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
