use clap::{Parser, Subcommand};
use comptoir_audit::LogLevel;
use comptoir_core::Role;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "comptoir", version, about = "Comptoir storefront auth CLI")]
struct Cli {
    /// Path to comptoir.yaml. Defaults to ./comptoir.yaml when present.
    #[arg(long, global = true, env = "COMPTOIR_CONFIG")]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the seeded accounts from the configuration if they are missing.
    Bootstrap,

    /// Create an account. The first account while no admin exists becomes admin.
    Signup {
        #[arg(long)]
        username: String,

        #[arg(long)]
        email: String,

        #[arg(long, env = "COMPTOIR_PASSWORD", hide_env_values = true)]
        password: String,

        /// Password confirmation (defaults to --password)
        #[arg(long)]
        confirm: Option<String>,
    },

    /// Log in and open the session.
    Login {
        #[arg(long)]
        username: String,

        #[arg(long, env = "COMPTOIR_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Show the current session, if it is still valid.
    Whoami,

    /// Exit with an error unless the session grants the given role.
    RequireRole {
        /// client, agent or admin
        role: Role,
    },

    /// Enter the admin area (admin sessions only).
    Admin,

    /// Close the current session.
    Logout,

    /// Run text through the input sanitizer.
    Sanitize { text: String },

    /// Security log
    Logs {
        #[command(subcommand)]
        cmd: LogsCommand,
    },

    /// Re-validate the session periodically until interrupted.
    Watch {
        /// Seconds between checks (defaults to session.watchdog_interval_secs)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        interval: Option<u64>,
    },
}

#[derive(Subcommand, Debug)]
enum LogsCommand {
    /// List entries, most recent first.
    List {
        /// Only entries of this level (info, success, warning, error)
        #[arg(long)]
        level: Option<LogLevel>,

        /// Only entries whose message contains this text
        #[arg(long)]
        contains: Option<String>,

        #[arg(long)]
        limit: Option<usize>,
    },

    /// Remove every entry.
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = commands::load_config(cli.config.as_deref())?;
    let json = cli.json;

    match cli.cmd {
        Command::Bootstrap => commands::account::bootstrap(&config, json).await?,
        Command::Signup {
            username,
            email,
            password,
            confirm,
        } => {
            let confirm = confirm.unwrap_or_else(|| password.clone());
            commands::account::signup(&config, &username, &email, &password, &confirm, json)
                .await?
        }
        Command::Login { username, password } => {
            commands::account::login(&config, &username, &password, json).await?
        }
        Command::Logout => commands::account::logout(&config, json).await?,
        Command::Sanitize { text } => commands::account::sanitize(&config, &text, json).await?,

        Command::Whoami => commands::session::whoami(&config, json).await?,
        Command::RequireRole { role } => {
            commands::session::require_role(&config, role, json).await?
        }
        Command::Admin => commands::session::admin(&config, json).await?,
        Command::Watch { interval } => commands::session::watch(&config, interval).await?,

        Command::Logs { cmd } => match cmd {
            LogsCommand::List {
                level,
                contains,
                limit,
            } => commands::logs::list(&config, level, contains, limit, json).await?,
            LogsCommand::Clear => commands::logs::clear(&config).await?,
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_require_role() {
        let cli = Cli::try_parse_from(["comptoir", "require-role", "agent"]).unwrap();
        assert!(matches!(cli.cmd, Command::RequireRole { role: Role::Agent }));

        assert!(Cli::try_parse_from(["comptoir", "require-role", "root"]).is_err());
    }

    #[test]
    fn test_watch_rejects_zero_interval() {
        assert!(Cli::try_parse_from(["comptoir", "watch", "--interval", "0"]).is_err());

        let cli = Cli::try_parse_from(["comptoir", "watch", "--interval", "5"]).unwrap();
        assert!(matches!(cli.cmd, Command::Watch { interval: Some(5) }));
    }

    #[test]
    fn test_parse_logs_list_filters() {
        let cli = Cli::try_parse_from([
            "comptoir", "--json", "logs", "list", "--level", "warn", "--limit", "5",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.cmd {
            Command::Logs {
                cmd: LogsCommand::List { level, limit, .. },
            } => {
                assert_eq!(level, Some(LogLevel::Warning));
                assert_eq!(limit, Some(5));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
