use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use quotebook_core::sync::{SyncOutcome, SyncStatus};
use serde::Serialize;

/// Manually trigger a sync cycle.
async fn trigger_sync(State(state): State<Arc<AppState>>) -> ApiResult<Json<SyncOutcome>> {
    let outcome = state.sync_service.sync_cycle().await?;
    Ok(Json(outcome))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SyncStatusResponse {
    #[serde(flatten)]
    status: SyncStatus,
    last_sync_time: Option<DateTime<Utc>>,
    pending_changes: bool,
}

async fn get_sync_status(State(state): State<Arc<AppState>>) -> Json<SyncStatusResponse> {
    let sync_state = state.quote_service.get_sync_state().await;
    Json(SyncStatusResponse {
        status: state.sync_service.status(),
        last_sync_time: sync_state.last_sync_time,
        pending_changes: sync_state.pending_changes,
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sync", post(trigger_sync))
        .route("/sync/status", get(get_sync_status))
}
