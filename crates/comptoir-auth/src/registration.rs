//! Account signup.

use std::sync::Arc;

use comptoir_audit::AuditLog;
use comptoir_core::{AuthConfig, Role};

use crate::credentials::{CredentialStore, User};
use crate::error::AuthError;

/// Signup form fields.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
}

/// Creates accounts from signup forms.
///
/// The first account created while no admin exists becomes `admin`; every
/// later one is a `client`.
pub struct Registrar {
    credentials: Arc<dyn CredentialStore>,
    audit: Arc<AuditLog>,
    config: AuthConfig,
}

impl Registrar {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        audit: Arc<AuditLog>,
        config: AuthConfig,
    ) -> Self {
        Self {
            credentials,
            audit,
            config,
        }
    }

    /// Validate the form and store the new account.
    ///
    /// Validation failures return [`AuthError::Validation`] and are not
    /// logged. Username and email are trimmed, passwords are taken as typed.
    pub async fn signup(&self, form: &SignupForm) -> Result<User, AuthError> {
        let username = form.username.trim();
        let email = form.email.trim();

        if username.is_empty()
            || email.is_empty()
            || form.password.is_empty()
            || form.confirm.is_empty()
        {
            return Err(AuthError::validation("Please fill in all fields"));
        }
        if form.password != form.confirm {
            return Err(AuthError::validation("Passwords do not match"));
        }
        if form.password.chars().count() < self.config.min_password_length {
            return Err(AuthError::validation(format!(
                "Password must be at least {} characters long",
                self.config.min_password_length
            )));
        }
        if self.credentials.get(username).await?.is_some() {
            return Err(AuthError::validation("This username already exists"));
        }

        let role = if self.credentials.has_admin_account().await? {
            Role::Client
        } else {
            Role::Admin
        };

        let user = User::with_password(
            username,
            &form.password,
            role,
            email,
            self.config.salt_bytes,
        );
        self.credentials.put(&user).await?;

        self.audit
            .success(format!("Account created: {} ({})", user.username, user.role))
            .await?;

        Ok(user)
    }
}
