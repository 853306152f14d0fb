//! # comptoir-core
//!
//! Shared building blocks for the Comptoir storefront auth crates:
//!
//! - [`config`]: the YAML configuration model (`comptoir.yaml`)
//! - [`role`]: the access tiers and their total order
//! - [`clock`]: wall-clock abstraction so expiry can be driven in tests
//! - [`store`]: the asynchronous string key-value substrate that sessions,
//!   credentials and the audit log persist through
//!
//! ## Storage keys
//!
//! | Key | Owner | Content |
//! |-----|-------|---------|
//! | `session` | session manager | JSON session record |
//! | `users/<username>` | credential store | JSON user record |
//! | `security_logs` | audit log | JSON array of log entries |

pub mod clock;
pub mod config;
pub mod role;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{
    AuditConfig, AuthConfig, ComptoirConfig, ConfigError, SeedAccount, SessionConfig,
    StoreBackend, StoreConfig,
};
pub use role::{Role, UnknownRole};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError, open_store};
