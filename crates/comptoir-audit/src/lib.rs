//! # comptoir-audit
//!
//! Security log for the Comptoir storefront.
//!
//! This crate provides functionality for:
//! - Appending entries (`info`, `success`, `warning`, `error`) to a bounded
//!   log that keeps the 100 most recent entries
//! - Persisting the log as a JSON array under the `security_logs` key
//! - Listing entries most-recent-first, with optional filters
//!
//! ## Entry Format
//!
//! ```json
//! { "timestamp": "17/10/2026 14:03:12", "message": "Logout: alice", "type": "info" }
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use comptoir_audit::{AuditLog, LogLevel};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let log = AuditLog::in_memory();
//!
//! log.success("Login succeeded: alice (admin)").await?;
//! log.append("Possible SQL injection attempt: --", LogLevel::Warning).await?;
//!
//! for entry in log.list().await? {
//!     println!("{}", entry.to_log_line());
//! }
//! # Ok(())
//! # }
//! ```

pub mod entry;
pub mod error;
pub mod logger;
pub mod storage;

pub use entry::{LogEntry, LogLevel};
pub use error::AuditError;
pub use logger::{AuditFilter, AuditLog};
pub use storage::{AuditStorage, KvStorage, LOG_KEY, NullStorage};
