use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::{KeyValueStore, StoreError};

/// In-memory store; contents live as long as the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned(e: impl std::fmt::Display) -> StoreError {
        StoreError::Unavailable(format!("failed to acquire store lock: {}", e))
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().map_err(Self::poisoned)?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(Self::poisoned)?;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(Self::poisoned)?;
        entries.remove(key);
        Ok(())
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let entries = self.entries.read().map_err(Self::poisoned)?;
        Ok(entries
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("session").await.unwrap(), None);

        store.set("session", "{}".to_string()).await.unwrap();
        assert_eq!(store.get("session").await.unwrap().as_deref(), Some("{}"));

        store.set("session", "[]".to_string()).await.unwrap();
        assert_eq!(store.get("session").await.unwrap().as_deref(), Some("[]"));

        store.remove("session").await.unwrap();
        assert_eq!(store.get("session").await.unwrap(), None);

        // Removing again is fine
        store.remove("session").await.unwrap();
    }

    #[tokio::test]
    async fn test_keys_with_prefix() {
        let store = MemoryStore::new();
        store.set("users/bob", "b".to_string()).await.unwrap();
        store.set("users/alice", "a".to_string()).await.unwrap();
        store.set("session", "s".to_string()).await.unwrap();
        store.set("usersx", "x".to_string()).await.unwrap();

        let keys = store.keys_with_prefix("users/").await.unwrap();
        assert_eq!(keys, vec!["users/alice", "users/bob"]);
    }
}
