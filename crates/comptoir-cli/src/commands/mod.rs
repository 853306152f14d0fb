//! CLI command implementations for Comptoir.

pub mod account;
pub mod logs;
pub mod session;

use anyhow::Context;
use comptoir_auth::AuthService;
use comptoir_core::ComptoirConfig;
use serde::Serialize;
use std::path::Path;

/// Configuration file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "comptoir.yaml";

/// Load the configuration from `path`, or from `./comptoir.yaml` when it
/// exists, or fall back to defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<ComptoirConfig> {
    if let Some(path) = path {
        return ComptoirConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        return ComptoirConfig::from_file(default_path)
            .with_context(|| format!("Failed to load config from {}", DEFAULT_CONFIG_FILE));
    }

    tracing::debug!("No config file found, using defaults");
    Ok(ComptoirConfig::default())
}

async fn open_service(config: &ComptoirConfig) -> anyhow::Result<AuthService> {
    AuthService::open(config).await.with_context(|| {
        format!(
            "Failed to open {:?} store at {}",
            config.store.backend,
            config.store.path.display()
        )
    })
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_config_from_explicit_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.yaml");
        fs::write(&path, "session:\n  ttl_minutes: 5\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.session.ttl_minutes, 5);
        assert_eq!(config.audit.max_entries, 100);
    }

    #[test]
    fn test_load_config_missing_explicit_path_fails() {
        let dir = tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("absent.yaml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }
}
