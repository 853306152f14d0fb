//! Audit logging configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the security log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Whether entries are recorded at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Number of entries kept; the oldest are evicted first.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_entries: default_max_entries(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_max_entries() -> usize {
    100
}
