//! Datastore keep-alive
//!
//! Periodically runs a cheap count query so an idle hosted database is
//! never paused for inactivity.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

use stem_core::error::DomainError;
use stem_core::traits::TeamRepository;

/// Run the keep-alive query once and log the outcome
pub async fn run_once(teams: &dyn TeamRepository) -> Result<i64, DomainError> {
    match teams.count().await {
        Ok(count) => {
            info!(teams = count, "Keep-alive query succeeded");
            Ok(count)
        }
        Err(e) => {
            error!(error = %e, "Keep-alive query failed");
            Err(e)
        }
    }
}

/// Spawn the keep-alive loop
///
/// The first query runs immediately. Failures are logged and the loop keeps going.
pub fn spawn_keepalive(teams: Arc<dyn TeamRepository>, period: Duration) -> JoinHandle<()> {
    info!(interval_secs = period.as_secs(), "Keep-alive started");

    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let _ = run_once(teams.as_ref()).await;
        }
    })
}
