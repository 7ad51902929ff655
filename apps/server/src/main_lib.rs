use std::sync::Arc;

use crate::config::Config;
use quotebook_core::quotes::{QuoteService, QuoteServiceTrait};
use quotebook_core::sync::QuoteSyncService;
use quotebook_remote_sync::RemoteQuoteClient;
use quotebook_storage_sqlite::{db, LocalStorageRepository};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub quote_service: Arc<dyn QuoteServiceTrait>,
    pub sync_service: Arc<QuoteSyncService>,
}

pub fn init_tracing() {
    let log_format = std::env::var("QB_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer(&pool)?;

    let storage = Arc::new(LocalStorageRepository::new(pool.clone(), writer));
    let quote_service: Arc<dyn QuoteServiceTrait> = Arc::new(QuoteService::load(storage).await?);

    let remote = Arc::new(RemoteQuoteClient::new(
        &config.remote_url,
        config.remote_timeout,
    )?);
    tracing::info!("Remote quote endpoint: {}", remote.base_url());
    let sync_service = Arc::new(QuoteSyncService::new(quote_service.clone(), remote));

    Ok(Arc::new(AppState {
        quote_service,
        sync_service,
    }))
}
