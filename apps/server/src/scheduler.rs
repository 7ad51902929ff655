//! Background scheduler for periodic quote sync.

use std::sync::Arc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::main_lib::AppState;
use quotebook_core::sync::SyncOutcome;

/// Starts the background sync scheduler. The first cycle runs immediately.
/// Does nothing when `period` is `None`.
pub fn start_sync_scheduler(state: Arc<AppState>, period: Option<Duration>) {
    let Some(period) = period else {
        info!("Quote sync scheduler disabled");
        return;
    };

    tokio::spawn(async move {
        info!("Quote sync scheduler started ({}s interval)", period.as_secs());

        let mut sync_interval = interval(period);
        sync_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            sync_interval.tick().await;
            run_scheduled_sync(&state).await;
        }
    });
}

/// Runs a single scheduled sync. Failures are logged by the sync service
/// and never stop the loop.
async fn run_scheduled_sync(state: &Arc<AppState>) {
    debug!("Running scheduled quote sync...");

    match state.sync_service.sync_cycle().await {
        Ok(SyncOutcome::Updated { total, .. }) => {
            info!("Scheduled sync updated the collection ({} quotes)", total);
        }
        Ok(SyncOutcome::Queued) => {
            debug!("Scheduled sync coalesced into the running cycle");
        }
        Ok(outcome) => debug!("Scheduled sync finished: {:?}", outcome),
        Err(e) => warn!("Scheduled quote sync failed: {}", e),
    }
}
