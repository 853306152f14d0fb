//! Security log entries.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// `strftime` pattern of [`LogEntry::timestamp`] (day first, local time).
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Routine event (logout, admin area access).
    Info,
    /// Successful login or account creation.
    Success,
    /// Failed login or tampered session.
    Error,
    /// Sanitizer hit.
    Warning,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Success => write!(f, "SUCCESS"),
            Self::Error => write!(f, "ERROR"),
            Self::Warning => write!(f, "WARNING"),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            "warning" | "warn" => Ok(Self::Warning),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

/// One entry of the security log.
///
/// Entries are never mutated once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Local time, formatted with [`TIMESTAMP_FORMAT`].
    pub timestamp: String,

    pub message: String,

    #[serde(rename = "type")]
    pub level: LogLevel,
}

impl LogEntry {
    /// Create an entry stamped with the given instant.
    pub fn new(at: DateTime<Utc>, message: impl Into<String>, level: LogLevel) -> Self {
        Self {
            timestamp: format_timestamp(at),
            message: message.into(),
            level,
        }
    }

    /// Format the entry as a human-readable line.
    ///
    /// Format: `[timestamp] LEVEL message`
    pub fn to_log_line(&self) -> String {
        format!("[{}] {} {}", self.timestamp, self.level, self.message)
    }
}

/// Render an instant the way log entries display it.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string()
}
