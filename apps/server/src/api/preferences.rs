use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
struct CategoryPreference {
    category: String,
}

async fn get_selected_category(State(state): State<Arc<AppState>>) -> Json<CategoryPreference> {
    let sync_state = state.quote_service.get_sync_state().await;
    Json(CategoryPreference {
        category: sync_state.selected_category,
    })
}

async fn set_selected_category(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CategoryPreference>,
) -> ApiResult<Json<CategoryPreference>> {
    let sync_state = state
        .quote_service
        .set_selected_category(&payload.category)
        .await?;
    Ok(Json(CategoryPreference {
        category: sync_state.selected_category,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/preferences/category",
        get(get_selected_category).put(set_selected_category),
    )
}
