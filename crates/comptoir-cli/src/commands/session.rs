//! Session commands.
//!
//! `comptoir whoami` - Show the validated session.
//! `comptoir require-role` - Role gate for scripts.
//! `comptoir admin` - Enter the admin area.
//! `comptoir watch` - Run the session watchdog in the foreground.

use std::time::Duration;

use anyhow::bail;
use chrono::DateTime;
use comptoir_audit::entry::format_timestamp;
use comptoir_auth::{Session, SessionState};
use comptoir_core::{ComptoirConfig, Role};
use serde_json::json;

use super::{open_service, print_json};

fn describe(session: &Session) -> String {
    let expires = DateTime::from_timestamp_millis(session.expires)
        .map(format_timestamp)
        .unwrap_or_else(|| session.expires.to_string());
    format!("{} ({}), expires {}", session.username, session.role, expires)
}

pub async fn whoami(config: &ComptoirConfig, json: bool) -> anyhow::Result<()> {
    let service = open_service(config).await?;
    let state = service.session_state().await?;

    if json {
        return print_json(&json!({
            "authenticated": state.is_authenticated(),
            "session": state.session(),
        }));
    }

    match state {
        SessionState::Authenticated(session) => println!("{}", describe(&session)),
        SessionState::Anonymous => println!("Not logged in."),
    }
    Ok(())
}

pub async fn require_role(config: &ComptoirConfig, role: Role, json: bool) -> anyhow::Result<()> {
    let service = open_service(config).await?;
    let granted = service.require_role(role).await?;

    if json {
        print_json(&json!({ "role": role, "granted": granted }))?;
    }

    if !granted {
        bail!("Access denied: {} role required", role);
    }
    if !json {
        println!("✔ Access granted ({})", role);
    }
    Ok(())
}

pub async fn admin(config: &ComptoirConfig, json: bool) -> anyhow::Result<()> {
    let service = open_service(config).await?;
    let session = service.enter_admin_area().await?;

    if json {
        print_json(&json!({ "granted": session.is_some(), "session": session }))?;
    }

    match session {
        Some(session) if !json => {
            println!("✔ Welcome to the admin area, {}", session.username);
            Ok(())
        }
        Some(_) => Ok(()),
        None => bail!("Access denied: admin session required"),
    }
}

pub async fn watch(config: &ComptoirConfig, interval: Option<u64>) -> anyhow::Result<()> {
    let service = open_service(config).await?;

    match service.validate_session().await? {
        Some(session) => println!("Watching session: {}", describe(&session)),
        None => println!("No active session; watching anyway."),
    }

    let handle = match interval {
        Some(secs) => service.spawn_watchdog_every(Duration::from_secs(secs)),
        None => service.spawn_watchdog(),
    };
    tracing::info!(
        interval_secs = interval.unwrap_or(config.session.watchdog_interval_secs),
        "Watchdog running, press Ctrl-C to stop"
    );

    tokio::signal::ctrl_c().await?;
    handle.abort();

    println!("Watchdog stopped.");
    Ok(())
}
