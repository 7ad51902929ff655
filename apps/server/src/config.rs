use anyhow::Context;
use quotebook_remote_sync::client::DEFAULT_TIMEOUT_MS;
use std::{net::SocketAddr, time::Duration};

pub const DEFAULT_REMOTE_URL: &str = "https://jsonplaceholder.typicode.com";

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub remote_url: String,
    pub remote_timeout: Duration,
    /// `None` disables the background sync scheduler.
    pub sync_interval: Option<Duration>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = env_or("QB_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid QB_LISTEN_ADDR")?;
        let db_path = env_or("QB_DB_PATH", "./db/quotebook.db");
        let cors_allow = env_or("QB_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms = env_u64("QB_REQUEST_TIMEOUT_MS", 30_000);
        let remote_url = env_or("QB_REMOTE_URL", DEFAULT_REMOTE_URL);
        let remote_timeout_ms = env_u64("QB_REMOTE_TIMEOUT_MS", DEFAULT_TIMEOUT_MS);
        let sync_interval_secs = env_u64("QB_SYNC_INTERVAL_SECS", 30);

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            remote_url,
            remote_timeout: Duration::from_millis(remote_timeout_ms),
            sync_interval: (sync_interval_secs > 0)
                .then_some(Duration::from_secs(sync_interval_secs)),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
