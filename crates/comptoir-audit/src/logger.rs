//! Audit logger implementation.
//!
//! Provides the `AuditLog` type: a bounded, append-only log of
//! security-relevant events with level helpers and display queries.

use std::sync::Arc;

use comptoir_core::{AuditConfig, Clock, KeyValueStore, MemoryStore, SystemClock};

use crate::entry::{LogEntry, LogLevel};
use crate::error::AuditError;
use crate::storage::{AuditStorage, KvStorage, NullStorage};

/// The security log.
///
/// Appending loads the stored log, pushes the entry, keeps only the most
/// recent `max_entries` and writes it back. Callers await each append before
/// issuing the next one.
pub struct AuditLog {
    config: AuditConfig,
    storage: Arc<dyn AuditStorage>,
    clock: Arc<dyn Clock>,
}

impl AuditLog {
    /// Create a log persisted in the given key-value store.
    pub fn new(config: AuditConfig, store: Arc<dyn KeyValueStore>) -> Self {
        let storage: Arc<dyn AuditStorage> = if config.enabled {
            Arc::new(KvStorage::new(store))
        } else {
            Arc::new(NullStorage::new())
        };

        Self {
            config,
            storage,
            clock: Arc::new(SystemClock),
        }
    }

    /// Create a log with a custom storage backend.
    pub fn with_storage(config: AuditConfig, storage: Arc<dyn AuditStorage>) -> Self {
        Self {
            config,
            storage,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used to stamp entries.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Create a disabled (no-op) log.
    pub fn disabled() -> Self {
        Self::with_storage(
            AuditConfig {
                enabled: false,
                ..Default::default()
            },
            Arc::new(NullStorage::new()),
        )
    }

    /// Create an enabled log backed by process memory.
    pub fn in_memory() -> Self {
        Self::new(AuditConfig::default(), Arc::new(MemoryStore::new()))
    }

    /// Check if logging is enabled.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Append an entry, evicting the oldest ones beyond capacity.
    pub async fn append(
        &self,
        message: impl Into<String>,
        level: LogLevel,
    ) -> Result<(), AuditError> {
        if !self.config.enabled {
            return Ok(());
        }

        let entry = LogEntry::new(self.clock.now(), message, level);

        match level {
            LogLevel::Info | LogLevel::Success => {
                tracing::info!(kind = %level, "{}", entry.message)
            }
            LogLevel::Warning => {
                tracing::warn!(kind = %level, "{}", entry.message)
            }
            LogLevel::Error => {
                tracing::error!(kind = %level, "{}", entry.message)
            }
        }

        let mut entries = self.storage.load().await?;
        entries.push(entry);
        if entries.len() > self.config.max_entries {
            let excess = entries.len() - self.config.max_entries;
            entries.drain(..excess);
        }
        self.storage.save(&entries).await
    }

    /// Log an informational event.
    pub async fn info(&self, message: impl Into<String>) -> Result<(), AuditError> {
        self.append(message, LogLevel::Info).await
    }

    /// Log a successful security event.
    pub async fn success(&self, message: impl Into<String>) -> Result<(), AuditError> {
        self.append(message, LogLevel::Success).await
    }

    /// Log a suspicious but non-blocking event.
    pub async fn warning(&self, message: impl Into<String>) -> Result<(), AuditError> {
        self.append(message, LogLevel::Warning).await
    }

    /// Log a failed or rejected security event.
    pub async fn error(&self, message: impl Into<String>) -> Result<(), AuditError> {
        self.append(message, LogLevel::Error).await
    }

    /// All entries, most recent first.
    pub async fn list(&self) -> Result<Vec<LogEntry>, AuditError> {
        let mut entries = self.storage.load().await?;
        entries.reverse();
        Ok(entries)
    }

    /// Entries matching a filter, most recent first.
    pub async fn query(&self, filter: AuditFilter) -> Result<Vec<LogEntry>, AuditError> {
        let needle = filter.contains.as_deref().map(str::to_lowercase);

        let entries = self
            .list()
            .await?
            .into_iter()
            .filter(|e| filter.level.is_none_or(|level| e.level == level))
            .filter(|e| {
                needle
                    .as_deref()
                    .is_none_or(|n| e.message.to_lowercase().contains(n))
            })
            .take(filter.limit.unwrap_or(usize::MAX))
            .collect();

        Ok(entries)
    }

    /// Drop every entry.
    pub async fn clear(&self) -> Result<(), AuditError> {
        tracing::info!("Security log cleared");
        self.storage.clear().await
    }
}

/// Filter for querying the security log.
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    /// Only entries of this level.
    pub level: Option<LogLevel>,
    /// Only entries whose message contains this text (case-insensitive).
    pub contains: Option<String>,
    /// Maximum number of results.
    pub limit: Option<usize>,
}
