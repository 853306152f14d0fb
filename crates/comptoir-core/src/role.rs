//! Access tiers.
//!
//! Roles form a total order `client < agent < admin`. The derived `Ord`
//! follows declaration order, so variants must stay sorted from least to
//! most privileged.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Access tier of an account or session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular shopper.
    Client,
    /// Sales agent; sees the agent section of the dashboard.
    Agent,
    /// Full access, including the admin area and the security logs.
    Admin,
}

impl Role {
    /// All roles, least privileged first.
    pub const ALL: [Role; 3] = [Role::Client, Role::Agent, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Agent => "agent",
            Role::Admin => "admin",
        }
    }

    /// Whether a holder of `self` may access something gated on `required`.
    pub fn grants(self, required: Role) -> bool {
        self >= required
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a role name is not one of `client`, `agent`, `admin`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "client" => Ok(Role::Client),
            "agent" => Ok(Role::Agent),
            "admin" => Ok(Role::Admin),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_order() {
        assert!(Role::Client < Role::Agent);
        assert!(Role::Agent < Role::Admin);
        assert_eq!(Role::ALL.iter().max(), Some(&Role::Admin));
    }

    #[test]
    fn test_grants() {
        assert!(Role::Admin.grants(Role::Client));
        assert!(Role::Admin.grants(Role::Admin));
        assert!(Role::Agent.grants(Role::Client));
        assert!(!Role::Agent.grants(Role::Admin));
        assert!(!Role::Client.grants(Role::Agent));
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Agent).unwrap(), r#""agent""#);
        let admin: Role = serde_json::from_str(r#""admin""#).unwrap();
        assert_eq!(admin, Role::Admin);
        assert!(serde_json::from_str::<Role>(r#""superuser""#).is_err());
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("CLIENT".parse::<Role>(), Ok(Role::Client));
        assert_eq!(" agent ".parse::<Role>(), Ok(Role::Agent));
        assert_eq!(
            "viewer".parse::<Role>(),
            Err(UnknownRole("viewer".to_string()))
        );
    }
}
