//! Error types for the auth crate.

use comptoir_audit::AuditError;
use comptoir_core::StoreError;
use thiserror::Error;

/// Errors that can occur during credential and session operations.
///
/// Only [`AuthError::Store`], [`AuthError::Audit`] and
/// [`AuthError::Serialization`] are storage failures; the other variants are
/// recoverable outcomes the caller shows as an inline message.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A form field is missing, too short or inconsistent.
    #[error("{0}")]
    Validation(String),

    /// Unknown username or wrong password. Deliberately does not say which.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The key-value store rejected a read or write.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// The security log could not be written.
    #[error("audit log error: {0}")]
    Audit(#[from] AuditError),

    /// A record could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AuthError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether this error comes from the persistence layer rather than from
    /// user input.
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, Self::Store(_) | Self::Audit(_) | Self::Serialization(_))
    }
}
