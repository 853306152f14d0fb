//! First-run seeding of the configured accounts.

use comptoir_core::SeedAccount;

use crate::credentials::{CredentialStore, User};
use crate::error::AuthError;

/// On first run, create every seeded account that does not exist yet.
///
/// Existing accounts are left untouched, so running this on every start is
/// safe. Returns the usernames that were created.
pub async fn ensure_default_users(
    credentials: &dyn CredentialStore,
    accounts: &[SeedAccount],
    salt_bytes: usize,
) -> Result<Vec<String>, AuthError> {
    let mut created = Vec::new();

    for account in accounts {
        if credentials.get(&account.username).await?.is_some() {
            continue;
        }

        let user = User::with_password(
            account.username.clone(),
            &account.password,
            account.role,
            account.email.clone(),
            salt_bytes,
        );
        credentials.put(&user).await?;

        tracing::warn!(
            username = %user.username,
            role = %user.role,
            "bootstrapped seeded account (password taken from config)"
        );
        created.push(user.username);
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::KvCredentialStore;
    use comptoir_core::{AuthConfig, MemoryStore, Role};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_creates_seeded_accounts_once() {
        let credentials = KvCredentialStore::new(Arc::new(MemoryStore::new()));
        let config = AuthConfig::default();

        let created = ensure_default_users(&credentials, &config.seed_accounts, 16)
            .await
            .unwrap();
        assert_eq!(created, vec!["elliot.gabiout", "M.Benzonana"]);

        let admin = credentials.get("elliot.gabiout").await.unwrap().unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert!(admin.verify_password("md5-0Fg-2i@N"));
        assert_ne!(admin.password_hash, "md5-0Fg-2i@N");

        let client = credentials.get("M.Benzonana").await.unwrap().unwrap();
        assert_eq!(client.role, Role::Client);
        assert!(client.verify_password("CPNV-ST-03"));

        // Second run is a no-op and keeps the first salts
        let again = ensure_default_users(&credentials, &config.seed_accounts, 16)
            .await
            .unwrap();
        assert!(again.is_empty());
        let admin_after = credentials.get("elliot.gabiout").await.unwrap().unwrap();
        assert_eq!(admin_after, admin);
    }

    #[tokio::test]
    async fn test_existing_account_not_overwritten() {
        let credentials = KvCredentialStore::new(Arc::new(MemoryStore::new()));
        let taken = User::with_password("M.Benzonana", "other-pw", Role::Agent, "x@example.com", 16);
        credentials.put(&taken).await.unwrap();

        let created = ensure_default_users(&credentials, &AuthConfig::default().seed_accounts, 16)
            .await
            .unwrap();
        assert_eq!(created, vec!["elliot.gabiout"]);
        assert_eq!(
            credentials.get("M.Benzonana").await.unwrap(),
            Some(taken)
        );
    }
}
