//! Sync cycle state machine models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Step a sync cycle is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SyncPhase {
    /// No sync in progress
    #[default]
    Idle,
    Fetching,
    Pushing,
    Merging,
}

impl std::fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncPhase::Idle => write!(f, "idle"),
            SyncPhase::Fetching => write!(f, "fetching"),
            SyncPhase::Pushing => write!(f, "pushing"),
            SyncPhase::Merging => write!(f, "merging"),
        }
    }
}

/// Terminal result of a triggered sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// The merged collection differed and replaced the stored one.
    #[serde(rename_all = "camelCase")]
    Updated {
        fetched: usize,
        pushed: usize,
        total: usize,
    },
    /// The merge produced the current collection.
    #[serde(rename_all = "camelCase")]
    Unchanged { fetched: usize, pushed: usize },
    /// Another cycle was in flight; a single follow-up was scheduled.
    Queued,
    /// The cycle aborted before touching the store.
    Failed,
}

/// Observable state for sync status indicators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatus {
    pub phase: SyncPhase,
    pub last_outcome: Option<SyncOutcome>,
    pub last_error: Option<String>,
    pub last_attempt_at: Option<DateTime<Utc>>,
    pub last_success_at: Option<DateTime<Utc>>,
}

/// Opaque acknowledgment returned by the remote endpoint for a push.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushAck {
    pub pushed: usize,
    pub response: serde_json::Value,
}
