//! Optional periodic enforcement driver.
//!
//! Hosts with their own simulation loop call [`Airlock::tick`] from it.
//! Hosts without one spawn this driver instead.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::service::Airlock;

/// Runs [`Airlock::tick`] every `period` until the returned handle is
/// aborted.
///
/// A sweep that overruns its slot skips the missed tick instead of
/// bunching delayed ones together. Stopping the driver leaves holds
/// intact; a later driver resumes sweeping the same records.
pub fn spawn_enforcer(airlock: Arc<Airlock>, period: Duration) -> JoinHandle<()> {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tracing::debug!(period_ms = period.as_millis() as u64, "enforcement driver started");
    tokio::spawn(async move {
        loop {
            // The first tick completes immediately; subsequent ticks wait.
            interval.tick().await;
            airlock.tick();
        }
    })
}
