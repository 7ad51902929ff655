use std::sync::Arc;

use crate::main_lib::AppState;
use axum::{extract::State, routing::get, Json, Router};
use quotebook_core::session::SessionState;

async fn get_session(State(state): State<Arc<AppState>>) -> Json<SessionState> {
    Json(state.quote_service.get_session().await)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/session", get(get_session))
}
