//! Session issuing and validation.
//!
//! A session is a JSON record in the `session` slot of the key-value store:
//!
//! ```json
//! {"username":"alice","role":"admin","loginTime":1700000000000,
//!  "expires":1700001800000,"signature":"…"}
//! ```
//!
//! The signature is `hash_password(claims + salt, salt)` where `claims` is
//! the compact JSON of the four other fields in the order above and `salt`
//! is the account's stored salt. Anyone who can read the store can also
//! recompute it; the signature only detects naive edits of the slot.

use std::sync::Arc;

use chrono::TimeDelta;
use comptoir_audit::AuditLog;
use comptoir_core::{Clock, KeyValueStore, Role, SessionConfig, SystemClock};
use serde::{Deserialize, Serialize};

use crate::credentials::{CredentialStore, User};
use crate::error::AuthError;
use crate::hashing::{digests_match, hash_password};
use crate::sanitizer::Sanitizer;

/// Key of the single session slot.
pub const SESSION_KEY: &str = "session";

/// A signed session record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Session {
    pub username: String,
    pub role: Role,
    /// Epoch milliseconds.
    pub login_time: i64,
    /// Epoch milliseconds; the session is invalid from this instant on.
    pub expires: i64,
    pub signature: String,
}

/// The signed part of a session, in signing order.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionClaims<'a> {
    username: &'a str,
    role: Role,
    login_time: i64,
    expires: i64,
}

impl Session {
    /// Issue a session for `user`, signed with the user's salt.
    pub fn issue(user: &User, login_time: i64, ttl: TimeDelta) -> Result<Self, AuthError> {
        let mut session = Self {
            username: user.username.clone(),
            role: user.role,
            login_time,
            expires: login_time + ttl.num_milliseconds(),
            signature: String::new(),
        };
        session.signature = session.compute_signature(&user.salt)?;
        Ok(session)
    }

    /// Recompute the signature of the current field values.
    pub fn compute_signature(&self, salt: &str) -> Result<String, AuthError> {
        let claims = serde_json::to_string(&SessionClaims {
            username: &self.username,
            role: self.role,
            login_time: self.login_time,
            expires: self.expires,
        })?;
        Ok(hash_password(&format!("{}{}", claims, salt), salt))
    }

    /// Whether the stored signature matches the current field values.
    pub fn verify_signature(&self, salt: &str) -> Result<bool, AuthError> {
        Ok(digests_match(&self.compute_signature(salt)?, &self.signature))
    }

    pub fn is_expired_at(&self, now_millis: i64) -> bool {
        now_millis >= self.expires
    }

    /// Time left before expiry (zero once expired).
    pub fn remaining_at(&self, now_millis: i64) -> TimeDelta {
        TimeDelta::milliseconds((self.expires - now_millis).max(0))
    }
}

/// Observable session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated(Session),
}

impl SessionState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(session) => Some(session),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// Owner of the session slot.
///
/// Every operation awaits its storage steps one after another; a login is
/// lookup, verify, write slot, then log.
pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
    credentials: Arc<dyn CredentialStore>,
    sanitizer: Arc<Sanitizer>,
    audit: Arc<AuditLog>,
    clock: Arc<dyn Clock>,
    ttl: TimeDelta,
}

impl SessionManager {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        credentials: Arc<dyn CredentialStore>,
        sanitizer: Arc<Sanitizer>,
        audit: Arc<AuditLog>,
        config: &SessionConfig,
    ) -> Self {
        Self {
            store,
            credentials,
            sanitizer,
            audit,
            clock: Arc::new(SystemClock),
            ttl: config.ttl(),
        }
    }

    /// Replace the clock used for issuing and expiry checks.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    /// Authenticate and open a session.
    ///
    /// Unknown users and wrong passwords both yield
    /// [`AuthError::InvalidCredentials`] and an error entry in the log.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::validation("Please fill in all fields"));
        }

        let username = self.sanitizer.sanitize(username).await?;
        let password = self.sanitizer.sanitize(password).await?;

        let user = match self.credentials.get(&username).await? {
            Some(user) if user.verify_password(&password) => user,
            _ => {
                tracing::info!(username = %username, "Login rejected");
                self.audit
                    .error(format!("Failed login attempt: {}", username))
                    .await?;
                return Err(AuthError::InvalidCredentials);
            }
        };

        let session = Session::issue(&user, self.clock.now_millis(), self.ttl)?;
        self.store
            .set(SESSION_KEY, serde_json::to_string(&session)?)
            .await?;

        tracing::info!(username = %session.username, role = %session.role, "Session opened");
        self.audit
            .success(format!("Login succeeded: {} ({})", user.username, user.role))
            .await?;

        Ok(session)
    }

    /// Read and check the stored session.
    ///
    /// Returns `None` (and deletes the slot) when the record is unparseable,
    /// expired, or its signature does not match the named account.
    pub async fn validate(&self) -> Result<Option<Session>, AuthError> {
        let Some(raw) = self.store.get(SESSION_KEY).await? else {
            return Ok(None);
        };

        let session: Session = match serde_json::from_str(&raw) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding malformed session");
                self.store.remove(SESSION_KEY).await?;
                return Ok(None);
            }
        };

        if session.is_expired_at(self.clock.now_millis()) {
            tracing::info!(username = %session.username, "Session expired");
            self.store.remove(SESSION_KEY).await?;
            return Ok(None);
        }

        let signature_ok = match self.credentials.get(&session.username).await? {
            Some(user) => session.verify_signature(&user.salt)?,
            // No salt to check against
            None => false,
        };

        if !signature_ok {
            tracing::warn!(username = %session.username, "Session signature mismatch");
            self.store.remove(SESSION_KEY).await?;
            self.audit
                .error(format!("Tampered session detected: {}", session.username))
                .await?;
            return Ok(None);
        }

        Ok(Some(session))
    }

    /// Current state of the slot, after validation.
    pub async fn state(&self) -> Result<SessionState, AuthError> {
        Ok(match self.validate().await? {
            Some(session) => SessionState::Authenticated(session),
            None => SessionState::Anonymous,
        })
    }

    /// Whether a valid session with at least `required` exists.
    pub async fn require_role(&self, required: Role) -> Result<bool, AuthError> {
        Ok(self
            .validate()
            .await?
            .is_some_and(|session| session.role.grants(required)))
    }

    /// Gate for the admin area: only an admin session passes, and each
    /// entry is logged.
    pub async fn enter_admin_area(&self) -> Result<Option<Session>, AuthError> {
        match self.validate().await? {
            Some(session) if session.role == Role::Admin => {
                self.audit
                    .info(format!("Admin area accessed: {}", session.username))
                    .await?;
                Ok(Some(session))
            }
            Some(session) => {
                tracing::info!(username = %session.username, role = %session.role, "Admin area refused");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// End the session. Returns the session that was closed, if one was valid.
    pub async fn logout(&self) -> Result<Option<Session>, AuthError> {
        let session = self.validate().await?;
        if let Some(ref session) = session {
            self.audit
                .info(format!("Logout: {}", session.username))
                .await?;
        }
        self.store.remove(SESSION_KEY).await?;
        tracing::debug!("Session slot cleared");
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User::with_password("alice", "s3cret!", Role::Agent, "alice@example.com", 16)
    }

    #[test]
    fn test_issue_sets_expiry_and_signature() {
        let user = user();
        let session = Session::issue(&user, 1_000, TimeDelta::minutes(30)).unwrap();
        assert_eq!(session.username, "alice");
        assert_eq!(session.role, Role::Agent);
        assert_eq!(session.login_time, 1_000);
        assert_eq!(session.expires, 1_000 + 30 * 60 * 1000);
        assert_eq!(session.signature.len(), 64);
        assert!(session.verify_signature(&user.salt).unwrap());
    }

    #[test]
    fn test_signature_covers_claims_in_order() {
        let user = user();
        let session = Session::issue(&user, 1_000, TimeDelta::minutes(30)).unwrap();
        let claims = format!(
            r#"{{"username":"alice","role":"agent","loginTime":1000,"expires":{}}}"#,
            1_000 + 30 * 60 * 1000
        );
        let expected = hash_password(&format!("{}{}", claims, user.salt), &user.salt);
        assert_eq!(session.signature, expected);
    }

    #[test]
    fn test_field_changes_break_signature() {
        let user = user();
        let session = Session::issue(&user, 1_000, TimeDelta::minutes(30)).unwrap();

        let mut promoted = session.clone();
        promoted.role = Role::Admin;
        assert!(!promoted.verify_signature(&user.salt).unwrap());

        let mut extended = session.clone();
        extended.expires += 1;
        assert!(!extended.verify_signature(&user.salt).unwrap());

        let mut renamed = session.clone();
        renamed.username = "mallory".to_string();
        assert!(!renamed.verify_signature(&user.salt).unwrap());

        let mut backdated = session;
        backdated.login_time -= 1;
        assert!(!backdated.verify_signature(&user.salt).unwrap());
    }

    #[test]
    fn test_expiry_boundary() {
        let session = Session::issue(&user(), 0, TimeDelta::minutes(30)).unwrap();
        let expires = session.expires;
        assert!(!session.is_expired_at(0));
        assert!(!session.is_expired_at(expires - 1));
        assert!(session.is_expired_at(expires));
        assert!(session.is_expired_at(expires + 1));
        assert_eq!(session.remaining_at(expires - 10), TimeDelta::milliseconds(10));
        assert_eq!(session.remaining_at(expires + 10), TimeDelta::zero());
    }

    #[test]
    fn test_session_json_shape() {
        let session = Session::issue(&user(), 5, TimeDelta::minutes(1)).unwrap();
        let json = serde_json::to_value(&session).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        for key in ["username", "role", "loginTime", "expires", "signature"] {
            assert!(keys.contains(&key.to_string()), "missing {}", key);
        }
        assert_eq!(keys.len(), 5);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let raw = r#"{"username":"a","role":"client","loginTime":1,"expires":2,"signature":"x","admin":true}"#;
        assert!(serde_json::from_str::<Session>(raw).is_err());
    }
}
