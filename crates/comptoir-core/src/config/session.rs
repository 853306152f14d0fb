//! Session lifetime configuration.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for issued sessions and the periodic validator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Minutes between login and expiry.
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: u32,

    /// Seconds between two watchdog validations.
    #[serde(default = "default_watchdog_interval_secs")]
    pub watchdog_interval_secs: u64,
}

impl SessionConfig {
    pub fn ttl(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.ttl_minutes))
    }

    pub fn watchdog_interval(&self) -> Duration {
        Duration::from_secs(self.watchdog_interval_secs)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_ttl_minutes(),
            watchdog_interval_secs: default_watchdog_interval_secs(),
        }
    }
}

fn default_ttl_minutes() -> u32 {
    30
}

fn default_watchdog_interval_secs() -> u64 {
    30
}
