//! Credential configuration.

use crate::role::Role;
use serde::{Deserialize, Serialize};

/// Password rules and first-run accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Minimum password length (in characters) accepted at signup.
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,

    /// Random bytes per salt; the stored salt is twice as many hex chars.
    #[serde(default = "default_salt_bytes")]
    pub salt_bytes: usize,

    /// Accounts created on first run when absent.
    #[serde(default = "default_seed_accounts")]
    pub seed_accounts: Vec<SeedAccount>,
}

/// An account created by the bootstrap step if it does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedAccount {
    pub username: String,
    /// Plaintext; hashed with a fresh salt before it is stored.
    pub password: String,
    pub role: Role,
    pub email: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            min_password_length: default_min_password_length(),
            salt_bytes: default_salt_bytes(),
            seed_accounts: default_seed_accounts(),
        }
    }
}

fn default_min_password_length() -> usize {
    6
}

fn default_salt_bytes() -> usize {
    16
}

fn default_seed_accounts() -> Vec<SeedAccount> {
    vec![
        SeedAccount {
            username: "elliot.gabiout".to_string(),
            password: "md5-0Fg-2i@N".to_string(),
            role: Role::Admin,
            email: "elliot.gabiout@example.com".to_string(),
        },
        SeedAccount {
            username: "M.Benzonana".to_string(),
            password: "CPNV-ST-03".to_string(),
            role: Role::Client,
            email: "M.Benzonana@example.com".to_string(),
        },
    ]
}
