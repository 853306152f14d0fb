//! Credential storage.
//!
//! One JSON row per account under `users/<username>`. Rows are written at
//! signup or bootstrap and never modified or deleted afterwards.

use std::sync::Arc;

use async_trait::async_trait;
use comptoir_core::{KeyValueStore, Role, StoreError};
use serde::{Deserialize, Serialize};

use crate::hashing::{hash_password, random_salt, verify_password};

/// Key prefix of user rows.
pub const USER_KEY_PREFIX: &str = "users/";

/// A stored account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    /// Hex SHA-256 of `salt:password`.
    pub password_hash: String,
    /// Hex random salt, also the signing key of this user's sessions.
    pub salt: String,
    pub role: Role,
    pub email: String,
}

impl User {
    /// Build an account from a plaintext password with a fresh salt.
    pub fn with_password(
        username: impl Into<String>,
        password: &str,
        role: Role,
        email: impl Into<String>,
        salt_bytes: usize,
    ) -> Self {
        let salt = random_salt(salt_bytes);
        let password_hash = hash_password(password, &salt);
        Self {
            username: username.into(),
            password_hash,
            salt,
            role,
            email: email.into(),
        }
    }

    pub fn verify_password(&self, password: &str) -> bool {
        verify_password(password, &self.salt, &self.password_hash)
    }
}

/// Trait for credential storage backends.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up an account by username.
    async fn get(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Insert or replace an account.
    async fn put(&self, user: &User) -> Result<(), StoreError>;

    /// Whether any stored account has the admin role.
    async fn has_admin_account(&self) -> Result<bool, StoreError>;
}

/// Credential store on top of the shared key-value substrate.
pub struct KvCredentialStore {
    store: Arc<dyn KeyValueStore>,
}

impl KvCredentialStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn key(username: &str) -> String {
        format!("{}{}", USER_KEY_PREFIX, username)
    }

    async fn load(&self, key: &str) -> Result<Option<User>, StoreError> {
        match self.store.get(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl CredentialStore for KvCredentialStore {
    async fn get(&self, username: &str) -> Result<Option<User>, StoreError> {
        self.load(&Self::key(username)).await
    }

    async fn put(&self, user: &User) -> Result<(), StoreError> {
        let json = serde_json::to_string(user)?;
        self.store.set(&Self::key(&user.username), json).await?;
        tracing::debug!(username = %user.username, role = %user.role, "Stored account");
        Ok(())
    }

    async fn has_admin_account(&self) -> Result<bool, StoreError> {
        for key in self.store.keys_with_prefix(USER_KEY_PREFIX).await? {
            if let Some(user) = self.load(&key).await? {
                if user.role == Role::Admin {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comptoir_core::MemoryStore;
    use pretty_assertions::assert_eq;

    fn create_test_store() -> (KvCredentialStore, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (KvCredentialStore::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_put_then_get_returns_equal_record() {
        let (credentials, _) = create_test_store();
        let user = User::with_password("alice", "s3cret!", Role::Agent, "alice@example.com", 16);

        credentials.put(&user).await.unwrap();
        let fetched = credentials.get("alice").await.unwrap();
        assert_eq!(fetched, Some(user));
    }

    #[tokio::test]
    async fn test_get_unknown_user() {
        let (credentials, _) = create_test_store();
        assert_eq!(credentials.get("nobody").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_row_layout() {
        let (credentials, store) = create_test_store();
        let user = User::with_password("bob", "pw1234", Role::Client, "bob@example.com", 16);
        credentials.put(&user).await.unwrap();

        let raw = store.get("users/bob").await.unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["username"], "bob");
        assert_eq!(json["role"], "client");
        assert_eq!(json["passwordHash"], user.password_hash.as_str());
        assert_eq!(json["salt"].as_str().unwrap().len(), 32);
    }

    #[tokio::test]
    async fn test_has_admin_account() {
        let (credentials, _) = create_test_store();
        assert!(!credentials.has_admin_account().await.unwrap());

        let client = User::with_password("c", "pw1234", Role::Client, "c@example.com", 16);
        credentials.put(&client).await.unwrap();
        assert!(!credentials.has_admin_account().await.unwrap());

        let admin = User::with_password("a", "pw1234", Role::Admin, "a@example.com", 16);
        credentials.put(&admin).await.unwrap();
        assert!(credentials.has_admin_account().await.unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_row_is_storage_error() {
        let (credentials, store) = create_test_store();
        store.set("users/eve", "garbage".to_string()).await.unwrap();
        assert!(matches!(
            credentials.get("eve").await,
            Err(StoreError::Corrupt(_))
        ));
    }

    #[test]
    fn test_user_verify_password() {
        let user = User::with_password("alice", "s3cret!", Role::Admin, "alice@example.com", 16);
        assert!(user.verify_password("s3cret!"));
        assert!(!user.verify_password("s3cret"));
    }
}
