use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use quotebook_core::quotes::{NewQuote, Quote, EXPORT_FILE_NAME};
use serde::{Deserialize, Serialize};

async fn list_quotes(State(state): State<Arc<AppState>>) -> Json<Vec<Quote>> {
    Json(state.quote_service.get_quotes().await)
}

async fn add_quote(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewQuote>,
) -> ApiResult<(StatusCode, Json<Quote>)> {
    let quote = state.quote_service.add_quote(payload).await?;
    Ok((StatusCode::CREATED, Json(quote)))
}

#[derive(Deserialize)]
struct RandomQuery {
    category: Option<String>,
}

#[derive(Serialize)]
struct RandomQuoteResponse {
    quote: Option<Quote>,
}

/// Random quote from `category`, or from the persisted selection when omitted.
async fn random_quote(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RandomQuery>,
) -> Json<RandomQuoteResponse> {
    let category = match query.category.filter(|c| !c.trim().is_empty()) {
        Some(category) => category,
        None => state.quote_service.get_sync_state().await.selected_category,
    };
    let quote = state.quote_service.pick_random(&category).await;
    Json(RandomQuoteResponse { quote })
}

async fn list_categories(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.quote_service.get_categories().await)
}

async fn export_quotes(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let body = state.quote_service.export_json().await?;
    let disposition = format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME);
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

#[derive(Serialize)]
struct ImportResponse {
    imported: usize,
}

async fn import_quotes(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<Json<ImportResponse>> {
    let payload = std::str::from_utf8(&body)
        .map_err(|_| ApiError::BadRequest("Import file must be UTF-8 encoded JSON".into()))?;
    let imported = state.quote_service.import_json(payload).await?;
    Ok(Json(ImportResponse { imported }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/quotes", get(list_quotes).post(add_quote))
        .route("/quotes/random", get(random_quote))
        .route("/quotes/categories", get(list_categories))
        .route("/quotes/export", get(export_quotes))
        .route("/quotes/import", post(import_quotes))
}
