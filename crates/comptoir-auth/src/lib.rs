//! # comptoir-auth
//!
//! Credentials, sessions and input sanitizing for Comptoir.
//!
//! This crate provides:
//! - Salted SHA-256 password hashing
//! - Account rows in the key-value store, signup and first-run seeding
//! - A single signed session slot with expiry and tamper detection
//! - A denylist sanitizer that reports every hit to the security log
//! - A watchdog that logs out once the session lapses
//!
//! ## Roles
//!
//! | Role | Grants |
//! |------|--------|
//! | `client` | client pages |
//! | `agent` | client and agent pages |
//! | `admin` | every page, including the admin area |
//!
//! The session signature is keyed with the account's salt, which lives in
//! the same store as the session. It catches hand edits of the slot, not an
//! attacker who can read the store.

pub mod bootstrap;
pub mod credentials;
pub mod error;
pub mod hashing;
pub mod registration;
pub mod sanitizer;
pub mod service;
pub mod session;
pub mod watchdog;

pub use bootstrap::ensure_default_users;
pub use credentials::{CredentialStore, KvCredentialStore, USER_KEY_PREFIX, User};
pub use error::AuthError;
pub use hashing::{hash_password, random_salt, verify_password};
pub use registration::{Registrar, SignupForm};
pub use sanitizer::{DENYLIST, Sanitizer, strip_denylisted};
pub use service::{AuthService, LoginResponse, SignupResponse};
pub use session::{SESSION_KEY, Session, SessionManager, SessionState};
pub use watchdog::SessionWatchdog;
