//! Sync cycle orchestration.
//!
//! A cycle fetches the remote collection, pushes local-only records when
//! local changes are pending, then merges into the live store. Cycles are
//! single-flight: a trigger that arrives while one is running is coalesced
//! into exactly one follow-up cycle.

use chrono::Utc;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::Mutex;

use super::sync_model::{SyncOutcome, SyncPhase, SyncStatus};
use super::sync_traits::RemoteQuoteSourceTrait;
use crate::errors::Result;
use crate::quotes::QuoteServiceTrait;

pub struct QuoteSyncService {
    quote_service: Arc<dyn QuoteServiceTrait>,
    remote: Arc<dyn RemoteQuoteSourceTrait>,
    in_flight: Mutex<()>,
    follow_up_requested: AtomicBool,
    status: RwLock<SyncStatus>,
}

impl QuoteSyncService {
    pub fn new(
        quote_service: Arc<dyn QuoteServiceTrait>,
        remote: Arc<dyn RemoteQuoteSourceTrait>,
    ) -> Self {
        QuoteSyncService {
            quote_service,
            remote,
            in_flight: Mutex::new(()),
            follow_up_requested: AtomicBool::new(false),
            status: RwLock::new(SyncStatus::default()),
        }
    }

    /// Current state of the sync machine.
    pub fn status(&self) -> SyncStatus {
        match self.status.read() {
            Ok(status) => status.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Runs one sync cycle, or queues a follow-up if one is already running.
    ///
    /// Returns the outcome of the last cycle this call executed. A failed
    /// cycle is returned as `Err` and recorded in [`status`](Self::status).
    pub async fn sync_cycle(&self) -> Result<SyncOutcome> {
        let Ok(guard) = self.in_flight.try_lock() else {
            debug!("Sync already in flight, queueing a follow-up cycle");
            self.follow_up_requested.store(true, Ordering::SeqCst);
            return Ok(SyncOutcome::Queued);
        };
        let mut guard = Some(guard);

        loop {
            let mut result = self.run_cycle().await;
            while self.follow_up_requested.swap(false, Ordering::SeqCst) {
                if let Err(e) = &result {
                    debug!("Previous cycle failed ({}), running queued follow-up", e);
                }
                result = self.run_cycle().await;
            }
            drop(guard.take());

            // A trigger may have queued itself between the last check and the
            // release above. Run it unless another caller already took over.
            if !self.follow_up_requested.load(Ordering::SeqCst) {
                return result;
            }
            match self.in_flight.try_lock() {
                Ok(next) => {
                    self.follow_up_requested.store(false, Ordering::SeqCst);
                    guard = Some(next);
                }
                Err(_) => return result,
            }
        }
    }

    async fn run_cycle(&self) -> Result<SyncOutcome> {
        self.update_status(|status| {
            status.last_attempt_at = Some(Utc::now());
        });

        match self.run_cycle_steps().await {
            Ok(outcome) => {
                self.update_status(|status| {
                    status.phase = SyncPhase::Idle;
                    status.last_outcome = Some(outcome.clone());
                    status.last_error = None;
                    status.last_success_at = Some(Utc::now());
                });
                Ok(outcome)
            }
            Err(e) => {
                warn!("Quote sync failed: {}", e);
                self.update_status(|status| {
                    status.phase = SyncPhase::Idle;
                    status.last_outcome = Some(SyncOutcome::Failed);
                    status.last_error = Some(e.to_string());
                });
                Err(e)
            }
        }
    }

    async fn run_cycle_steps(&self) -> Result<SyncOutcome> {
        self.set_phase(SyncPhase::Fetching);
        let remote = self.remote.fetch_remote().await?;
        let fetched = remote.len();
        debug!("Fetched {} remote quotes", fetched);

        let changes = self.quote_service.local_changes().await;
        let mut pushed_generation = None;
        let mut pushed = 0;
        if changes.pending {
            self.set_phase(SyncPhase::Pushing);
            let ack = self.remote.push_local(&changes.quotes).await?;
            debug!("Remote acknowledged push: {}", ack.response);
            pushed = ack.pushed;
            pushed_generation = Some(changes.generation);
        }

        self.set_phase(SyncPhase::Merging);
        let applied = self
            .quote_service
            .apply_remote(remote, pushed_generation)
            .await?;

        if applied.changed {
            info!(
                "Quotes synced with server: {} fetched, {} pushed, {} total",
                fetched, pushed, applied.total
            );
            Ok(SyncOutcome::Updated {
                fetched,
                pushed,
                total: applied.total,
            })
        } else {
            debug!("Quote sync finished with no collection changes");
            Ok(SyncOutcome::Unchanged { fetched, pushed })
        }
    }

    fn set_phase(&self, phase: SyncPhase) {
        self.update_status(|status| status.phase = phase);
    }

    fn update_status(&self, f: impl FnOnce(&mut SyncStatus)) {
        let mut guard = match self.status.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard);
    }
}
