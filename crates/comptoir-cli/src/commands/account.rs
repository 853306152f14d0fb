//! Account commands.
//!
//! `comptoir bootstrap` - Create the seeded accounts.
//! `comptoir signup` - Create an account.
//! `comptoir login` - Open a session.
//! `comptoir logout` - Close the session.
//! `comptoir sanitize` - Show what the sanitizer does to a string.

use anyhow::Context;
use comptoir_auth::AuthService;
use comptoir_core::ComptoirConfig;
use serde_json::json;

use super::{open_service, print_json};

pub async fn bootstrap(config: &ComptoirConfig, json: bool) -> anyhow::Result<()> {
    // `connect` does not seed
    let service = AuthService::connect(config)
        .await
        .with_context(|| format!("Failed to open store at {}", config.store.path.display()))?;
    let created = service.ensure_default_users().await?;

    if json {
        return print_json(&json!({ "created": created }));
    }

    if created.is_empty() {
        println!("All seeded accounts already exist.");
    } else {
        println!("✔ Created {} seeded account(s):", created.len());
        for username in &created {
            println!("  {}", username);
        }
    }
    Ok(())
}

pub async fn signup(
    config: &ComptoirConfig,
    username: &str,
    email: &str,
    password: &str,
    confirm: &str,
    json: bool,
) -> anyhow::Result<()> {
    let service = open_service(config).await?;
    let response = service.signup(username, email, password, confirm).await?;

    if json {
        print_json(&response)?;
    } else if response.ok {
        println!("✔ {}", response.message);
    } else {
        eprintln!("✘ {}", response.message);
    }

    if !response.ok {
        std::process::exit(1);
    }
    Ok(())
}

pub async fn login(
    config: &ComptoirConfig,
    username: &str,
    password: &str,
    json: bool,
) -> anyhow::Result<()> {
    let service = open_service(config).await?;
    let response = service.login(username, password).await?;

    if json {
        print_json(&response)?;
    } else {
        match (&response.role, &response.message) {
            (Some(role), _) if response.ok => println!("✔ Logged in as {} ({})", username.trim(), role),
            (_, Some(message)) => eprintln!("✘ {}", message),
            _ => eprintln!("✘ Login failed"),
        }
    }

    if !response.ok {
        std::process::exit(1);
    }
    Ok(())
}

pub async fn logout(config: &ComptoirConfig, json: bool) -> anyhow::Result<()> {
    let service = open_service(config).await?;
    let closed = service.logout().await?;

    if json {
        return print_json(&json!({ "closed": closed }));
    }

    match closed {
        Some(session) => println!("✔ Logged out {}", session.username),
        None => println!("No active session."),
    }
    Ok(())
}

pub async fn sanitize(config: &ComptoirConfig, text: &str, json: bool) -> anyhow::Result<()> {
    let service = open_service(config).await?;
    let sanitized = service.sanitize(text).await?;

    if json {
        print_json(&json!({ "input": text, "sanitized": sanitized }))
    } else {
        println!("{}", sanitized);
        Ok(())
    }
}
