//! Configuration types for Comptoir.
//!
//! Configuration is loaded from a single YAML file (`comptoir.yaml`). Every
//! section and field has a default, so an empty file (or no file at all)
//! yields a working configuration.
//!
//! # Sections
//!
//! - **store**: which key-value backend persists sessions, users and logs
//! - **session**: session lifetime and watchdog period
//! - **audit**: security log capacity and on/off switch
//! - **auth**: password rules and the first-run seeded accounts

pub mod audit;
pub mod auth;
pub mod session;
pub mod store;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use audit::AuditConfig;
pub use auth::{AuthConfig, SeedAccount};
pub use session::SessionConfig;
pub use store::{StoreBackend, StoreConfig};

/// Complete Comptoir configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComptoirConfig {
    /// Persistence backend.
    #[serde(default)]
    pub store: StoreConfig,

    /// Session lifetime settings.
    #[serde(default)]
    pub session: SessionConfig,

    /// Security log settings.
    #[serde(default)]
    pub audit: AuditConfig,

    /// Credential rules and seeded accounts.
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ComptoirConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content and validate it.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // serde_yaml maps an empty document to unit, not to an empty mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the auth core cannot operate with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.ttl_minutes == 0 {
            return Err(ConfigError::Config(
                "session.ttl_minutes must be greater than zero".to_string(),
            ));
        }
        if self.session.watchdog_interval_secs == 0 {
            return Err(ConfigError::Config(
                "session.watchdog_interval_secs must be greater than zero".to_string(),
            ));
        }
        if self.audit.max_entries == 0 {
            return Err(ConfigError::Config(
                "audit.max_entries must be greater than zero".to_string(),
            ));
        }
        if self.auth.salt_bytes == 0 {
            return Err(ConfigError::Config(
                "auth.salt_bytes must be greater than zero".to_string(),
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for account in &self.auth.seed_accounts {
            if account.username.trim().is_empty() {
                return Err(ConfigError::Config(
                    "auth.seed_accounts entries need a username".to_string(),
                ));
            }
            if !seen.insert(account.username.as_str()) {
                return Err(ConfigError::Config(format!(
                    "duplicate seeded account '{}'",
                    account.username
                )));
            }
        }

        if self.store.backend == StoreBackend::File && self.store.path.as_os_str().is_empty() {
            return Err(ConfigError::Config(
                "store.path is required for the file backend".to_string(),
            ));
        }

        Ok(())
    }
}
