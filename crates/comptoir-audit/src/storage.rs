//! Audit storage backends.

use std::sync::Arc;

use async_trait::async_trait;
use comptoir_core::KeyValueStore;

use crate::entry::LogEntry;
use crate::error::AuditError;

/// Key under which the security log is persisted.
pub const LOG_KEY: &str = "security_logs";

/// Trait for audit storage backends.
///
/// Storage holds the whole ordered log (oldest first); capacity is enforced
/// by the logger, not by the backend.
#[async_trait]
pub trait AuditStorage: Send + Sync {
    /// Read every stored entry, oldest first.
    async fn load(&self) -> Result<Vec<LogEntry>, AuditError>;

    /// Replace the stored log.
    async fn save(&self, entries: &[LogEntry]) -> Result<(), AuditError>;

    /// Drop the stored log.
    async fn clear(&self) -> Result<(), AuditError>;
}

/// Stores the log as one JSON array under a single key.
pub struct KvStorage {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl KvStorage {
    /// Use the default [`LOG_KEY`].
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, LOG_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }
}

#[async_trait]
impl AuditStorage for KvStorage {
    async fn load(&self) -> Result<Vec<LogEntry>, AuditError> {
        let Some(raw) = self.store.get(&self.key).await? else {
            return Ok(Vec::new());
        };

        // An unreadable array is treated as an empty log; the next append
        // overwrites it.
        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Discarding unreadable security log");
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, entries: &[LogEntry]) -> Result<(), AuditError> {
        let json = serde_json::to_string(entries)?;
        self.store.set(&self.key, json).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), AuditError> {
        self.store.remove(&self.key).await?;
        Ok(())
    }
}

/// Discards everything (used when auditing is disabled).
#[derive(Debug, Default)]
pub struct NullStorage;

impl NullStorage {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuditStorage for NullStorage {
    async fn load(&self) -> Result<Vec<LogEntry>, AuditError> {
        Ok(Vec::new())
    }

    async fn save(&self, _entries: &[LogEntry]) -> Result<(), AuditError> {
        Ok(())
    }

    async fn clear(&self) -> Result<(), AuditError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::LogLevel;
    use comptoir_core::MemoryStore;

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            timestamp: "01/01/2025 00:00:00".to_string(),
            message: message.to_string(),
            level: LogLevel::Info,
        }
    }

    #[tokio::test]
    async fn test_kv_storage_roundtrip() {
        let store = Arc::new(MemoryStore::new());
        let storage = KvStorage::new(store.clone());

        assert!(storage.load().await.unwrap().is_empty());

        storage.save(&[entry("a"), entry("b")]).await.unwrap();
        let loaded = storage.load().await.unwrap();
        assert_eq!(loaded, vec![entry("a"), entry("b")]);

        // Persisted as a JSON array under its own key
        let raw = store.get(LOG_KEY).await.unwrap().unwrap();
        assert!(raw.starts_with('['));

        storage.clear().await.unwrap();
        assert_eq!(store.get(LOG_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unreadable_log_loads_empty() {
        let store = Arc::new(MemoryStore::new());
        store.set(LOG_KEY, "{broken".to_string()).await.unwrap();

        let storage = KvStorage::new(store);
        assert!(storage.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_null_storage() {
        let storage = NullStorage::new();
        storage.save(&[entry("a")]).await.unwrap();
        assert!(storage.load().await.unwrap().is_empty());
    }
}
