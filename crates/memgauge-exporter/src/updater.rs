//! Periodic snapshot updater.
//!
//! Fetches `NodeStats` from a `SnapshotSource` on a fixed interval and pushes
//! them into the state's collector. A failed fetch keeps the previous gauge
//! values; the next tick simply tries again.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, MissedTickBehavior};

use memgauge_core::error::Result;

use crate::app_state::AppState;
use crate::collector::StatsCollector;
use crate::source::SnapshotSource;

/// Fetch one snapshot and apply it.
pub async fn refresh_once(collector: &dyn StatsCollector, source: &dyn SnapshotSource) -> Result<()> {
    let stats = source.fetch().await?;
    collector.set(&stats);
    Ok(())
}

/// Run `refresh_once` every `every` until `shutdown` flips to true.
pub fn spawn_updater(
    state: AppState,
    source: Arc<dyn SnapshotSource>,
    every: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                    continue;
                }
            }

            match refresh_once(state.stats_collector(), source.as_ref()).await {
                Ok(()) => {
                    if !state.mark_ready() {
                        tracing::info!(source = %source.name(), "first memory snapshot applied");
                    } else {
                        tracing::debug!(source = %source.name(), "memory snapshot applied");
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        source = %source.name(),
                        code = e.code().as_str(),
                        error = %e,
                        "memory snapshot update failed; keeping previous values"
                    );
                }
            }
        }

        tracing::debug!("updater stopped");
    })
}

/// Wait for the updater task to finish.
/// Returns false (and logs) when the task panicked or was cancelled.
pub async fn join(handle: JoinHandle<()>) -> bool {
    match handle.await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, panicked = e.is_panic(), "updater task did not finish cleanly");
            false
        }
    }
}
