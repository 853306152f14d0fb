//! UI-facing facade.
//!
//! [`AuthService`] wires the store, credential rows, sanitizer, audit log and
//! session manager together and exposes the operations a front end calls.
//! Recoverable failures come back as `ok: false` responses with a message;
//! only storage failures are returned as `Err`.

use std::sync::Arc;
use std::time::Duration;

use comptoir_audit::{AuditFilter, AuditLog, LogEntry, LogLevel};
use comptoir_core::{Clock, ComptoirConfig, KeyValueStore, Role, SystemClock, open_store};
use serde::Serialize;
use tokio::task::JoinHandle;

use crate::bootstrap;
use crate::credentials::{CredentialStore, KvCredentialStore};
use crate::error::AuthError;
use crate::registration::{Registrar, SignupForm};
use crate::sanitizer::Sanitizer;
use crate::session::{Session, SessionManager, SessionState};
use crate::watchdog::SessionWatchdog;

/// Outcome of a login attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Outcome of a signup attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub message: String,
}

pub struct AuthService {
    config: ComptoirConfig,
    credentials: Arc<dyn CredentialStore>,
    audit: Arc<AuditLog>,
    sanitizer: Arc<Sanitizer>,
    sessions: Arc<SessionManager>,
    registrar: Registrar,
}

impl AuthService {
    /// Build the service on an existing store with the system clock.
    pub fn new(config: &ComptoirConfig, store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_clock(config, store, Arc::new(SystemClock))
    }

    /// Build the service with an explicit clock for session times and log
    /// timestamps.
    pub fn with_clock(
        config: &ComptoirConfig,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let credentials: Arc<dyn CredentialStore> =
            Arc::new(KvCredentialStore::new(store.clone()));
        let audit = Arc::new(
            AuditLog::new(config.audit.clone(), store.clone()).with_clock(clock.clone()),
        );
        let sanitizer = Arc::new(Sanitizer::new(audit.clone()));
        let sessions = Arc::new(
            SessionManager::new(
                store,
                credentials.clone(),
                sanitizer.clone(),
                audit.clone(),
                &config.session,
            )
            .with_clock(clock),
        );
        let registrar = Registrar::new(credentials.clone(), audit.clone(), config.auth.clone());

        Self {
            config: config.clone(),
            credentials,
            audit,
            sanitizer,
            sessions,
            registrar,
        }
    }

    /// Open the configured store, build the service on it and create any
    /// missing seeded account.
    pub async fn open(config: &ComptoirConfig) -> Result<Self, AuthError> {
        let service = Self::connect(config).await?;
        service.ensure_default_users().await?;
        Ok(service)
    }

    /// Open the configured store without seeding accounts.
    pub async fn connect(config: &ComptoirConfig) -> Result<Self, AuthError> {
        let store: Arc<dyn KeyValueStore> = Arc::from(open_store(&config.store).await?);
        Ok(Self::new(config, store))
    }

    /// Create the configured seed accounts that do not exist yet.
    pub async fn ensure_default_users(&self) -> Result<Vec<String>, AuthError> {
        bootstrap::ensure_default_users(
            self.credentials.as_ref(),
            &self.config.auth.seed_accounts,
            self.config.auth.salt_bytes,
        )
        .await
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, AuthError> {
        match self.sessions.login(username, password).await {
            Ok(session) => Ok(LoginResponse {
                ok: true,
                role: Some(session.role),
                message: None,
            }),
            Err(e) if e.is_storage_failure() => Err(e),
            Err(e) => Ok(LoginResponse {
                ok: false,
                role: None,
                message: Some(display_message(&e)),
            }),
        }
    }

    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> Result<SignupResponse, AuthError> {
        let form = SignupForm {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm: confirm.to_string(),
        };

        match self.registrar.signup(&form).await {
            Ok(user) => {
                let message = if user.role == Role::Admin {
                    "Initial admin account created. You can now log in."
                } else {
                    "Account created. You can now log in."
                };
                Ok(SignupResponse {
                    ok: true,
                    role: Some(user.role),
                    message: message.to_string(),
                })
            }
            Err(e) if e.is_storage_failure() => Err(e),
            Err(e) => Ok(SignupResponse {
                ok: false,
                role: None,
                message: display_message(&e),
            }),
        }
    }

    pub async fn validate_session(&self) -> Result<Option<Session>, AuthError> {
        self.sessions.validate().await
    }

    pub async fn session_state(&self) -> Result<SessionState, AuthError> {
        self.sessions.state().await
    }

    pub async fn require_role(&self, role: Role) -> Result<bool, AuthError> {
        self.sessions.require_role(role).await
    }

    pub async fn enter_admin_area(&self) -> Result<Option<Session>, AuthError> {
        self.sessions.enter_admin_area().await
    }

    pub async fn logout(&self) -> Result<Option<Session>, AuthError> {
        self.sessions.logout().await
    }

    pub async fn sanitize(&self, input: &str) -> Result<String, AuthError> {
        Ok(self.sanitizer.sanitize(input).await?)
    }

    pub async fn append_log(&self, message: &str, level: LogLevel) -> Result<(), AuthError> {
        Ok(self.audit.append(message, level).await?)
    }

    /// Security log, most recent first.
    pub async fn list_logs(&self) -> Result<Vec<LogEntry>, AuthError> {
        Ok(self.audit.list().await?)
    }

    pub async fn query_logs(&self, filter: AuditFilter) -> Result<Vec<LogEntry>, AuthError> {
        Ok(self.audit.query(filter).await?)
    }

    pub async fn clear_logs(&self) -> Result<(), AuthError> {
        Ok(self.audit.clear().await?)
    }

    /// Start the session watchdog at the configured interval.
    pub fn spawn_watchdog(&self) -> JoinHandle<()> {
        self.spawn_watchdog_every(self.config.session.watchdog_interval())
    }

    pub fn spawn_watchdog_every(&self, interval: Duration) -> JoinHandle<()> {
        SessionWatchdog::spawn(self.sessions.clone(), interval)
    }
}

fn display_message(error: &AuthError) -> String {
    match error {
        AuthError::Validation(message) => message.clone(),
        AuthError::InvalidCredentials => "Invalid username or password".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comptoir_core::MemoryStore;
    use pretty_assertions::assert_eq;

    fn service() -> AuthService {
        AuthService::new(&ComptoirConfig::default(), Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_login_response_shapes() {
        let service = service();
        service.ensure_default_users().await.unwrap();

        let ok = service.login("M.Benzonana", "CPNV-ST-03").await.unwrap();
        assert_eq!(
            ok,
            LoginResponse {
                ok: true,
                role: Some(Role::Client),
                message: None
            }
        );

        let bad = service.login("M.Benzonana", "nope").await.unwrap();
        assert!(!bad.ok);
        assert_eq!(bad.message.as_deref(), Some("Invalid username or password"));

        let empty = service.login("", "x").await.unwrap();
        assert_eq!(empty.message.as_deref(), Some("Please fill in all fields"));
    }

    #[tokio::test]
    async fn test_signup_messages() {
        let service = service();

        let first = service
            .signup("alice", "alice@example.com", "secret1", "secret1")
            .await
            .unwrap();
        assert_eq!(first.role, Some(Role::Admin));
        assert_eq!(
            first.message,
            "Initial admin account created. You can now log in."
        );

        let second = service
            .signup("bob", "bob@example.com", "secret2", "secret2")
            .await
            .unwrap();
        assert_eq!(second.role, Some(Role::Client));
        assert_eq!(second.message, "Account created. You can now log in.");

        let rejected = service
            .signup("carol", "carol@example.com", "abc", "abc")
            .await
            .unwrap();
        assert!(!rejected.ok);
        assert_eq!(rejected.role, None);
    }

    #[test]
    fn test_login_response_json() {
        let json = serde_json::to_string(&LoginResponse {
            ok: false,
            role: None,
            message: Some("Invalid username or password".to_string()),
        })
        .unwrap();
        assert_eq!(json, r#"{"ok":false,"message":"Invalid username or password"}"#);
    }
}
