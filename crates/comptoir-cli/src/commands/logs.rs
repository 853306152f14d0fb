//! Security log commands.
//!
//! `comptoir logs list` - Show entries, most recent first.
//! `comptoir logs clear` - Remove every entry.

use comptoir_audit::{AuditFilter, LogLevel};
use comptoir_core::ComptoirConfig;

use super::{open_service, print_json};

pub async fn list(
    config: &ComptoirConfig,
    level: Option<LogLevel>,
    contains: Option<String>,
    limit: Option<usize>,
    json: bool,
) -> anyhow::Result<()> {
    let service = open_service(config).await?;
    let entries = service
        .query_logs(AuditFilter {
            level,
            contains,
            limit,
        })
        .await?;

    if json {
        return print_json(&entries);
    }

    if entries.is_empty() {
        println!("No log entries.");
        return Ok(());
    }
    for entry in &entries {
        println!("{}", entry.to_log_line());
    }
    Ok(())
}

pub async fn clear(config: &ComptoirConfig) -> anyhow::Result<()> {
    let service = open_service(config).await?;
    service.clear_logs().await?;
    println!("✔ Security log cleared");
    Ok(())
}
