//! HTTP client for the remote quote collection.

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use std::time::Duration;

use crate::error::{RemoteSyncError, Result};
use crate::types::{PushRequest, RemotePost, REMOTE_FETCH_LIMIT};
use quotebook_core::quotes::Quote;
use quotebook_core::sync::{PushAck, RemoteQuoteSourceTrait};

/// Default timeout for remote requests.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Client for a JSON placeholder style `/posts` API.
#[derive(Debug, Clone)]
pub struct RemoteQuoteClient {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteQuoteClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the API (e.g. "https://jsonplaceholder.typicode.com")
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=UTF-8"),
        );
        headers
    }

    /// Parse a JSON response body.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        debug!("Remote response ({}): {}", status, body);

        if !status.is_success() {
            return Err(RemoteSyncError::api(
                status.as_u16(),
                format!("Request failed: {}", body),
            ));
        }

        serde_json::from_str(&body).map_err(|e| {
            log::error!(
                "Failed to deserialize response. Body: {}, Error: {}",
                body,
                e
            );
            RemoteSyncError::from(e)
        })
    }

    /// Fetch the remote collection.
    ///
    /// GET /posts?_limit=5
    pub async fn fetch_posts(&self) -> Result<Vec<RemotePost>> {
        let url = format!("{}/posts", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("_limit", REMOTE_FETCH_LIMIT)])
            .send()
            .await?;

        let mut posts: Vec<RemotePost> = Self::parse_response(response).await?;
        posts.truncate(REMOTE_FETCH_LIMIT);
        Ok(posts)
    }

    /// Push local-only quotes as one batch.
    ///
    /// POST /posts
    pub async fn push_quotes(&self, quotes: &[Quote]) -> Result<serde_json::Value> {
        let url = format!("{}/posts", self.base_url);
        let request = PushRequest {
            quotes,
            timestamp: Utc::now(),
        };
        debug!("Pushing {} local quotes to {}", quotes.len(), url);

        let response = self
            .client
            .post(&url)
            .headers(Self::headers())
            .json(&request)
            .send()
            .await?;

        Self::parse_response(response).await
    }
}

#[async_trait]
impl RemoteQuoteSourceTrait for RemoteQuoteClient {
    async fn fetch_remote(&self) -> quotebook_core::Result<Vec<Quote>> {
        let posts = self.fetch_posts().await?;
        Ok(posts.into_iter().map(RemotePost::into_quote).collect())
    }

    async fn push_local(&self, quotes: &[Quote]) -> quotebook_core::Result<PushAck> {
        let response = self.push_quotes(quotes).await?;
        Ok(PushAck {
            pushed: quotes.len(),
            response,
        })
    }
}
