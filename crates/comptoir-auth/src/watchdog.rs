//! Periodic session check.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::error::AuthError;
use crate::session::SessionManager;

/// Shortest interval the watchdog runs at.
pub const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Background task that re-validates the session slot on a fixed interval
/// and logs out once no valid session remains.
///
/// The task runs until its handle is aborted; logging out does not stop it.
pub struct SessionWatchdog;

impl SessionWatchdog {
    /// Start the watchdog. The first check happens one `interval` from now.
    ///
    /// Intervals below [`MIN_INTERVAL`] (including zero) are raised to it.
    pub fn spawn(manager: Arc<SessionManager>, interval: Duration) -> JoinHandle<()> {
        let interval = if interval < MIN_INTERVAL {
            tracing::warn!(
                requested_ms = interval.as_millis() as u64,
                "Watchdog interval too short, using {}s",
                MIN_INTERVAL.as_secs()
            );
            MIN_INTERVAL
        } else {
            interval
        };

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            tracing::debug!(interval_secs = interval.as_secs(), "Session watchdog started");

            loop {
                ticker.tick().await;

                if let Err(e) = Self::check(&manager).await {
                    tracing::error!(error = %e, "Session watchdog check failed");
                }
            }
        })
    }

    /// Run a single check. Returns `true` when a valid session is still open.
    pub async fn check(manager: &SessionManager) -> Result<bool, AuthError> {
        if manager.validate().await?.is_some() {
            return Ok(true);
        }

        manager.logout().await?;
        tracing::debug!("Session watchdog found no valid session");
        Ok(false)
    }
}
