//! Wire types for the remote `/posts` endpoint.

use chrono::{DateTime, Utc};
use quotebook_core::quotes::{Quote, QuoteSource};
use serde::{Deserialize, Serialize};

/// Number of posts requested and kept per fetch.
pub const REMOTE_FETCH_LIMIT: usize = 5;

/// A post as returned by `GET /posts`. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePost {
    pub user_id: i64,
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
}

impl RemotePost {
    pub fn into_quote(self) -> Quote {
        Quote {
            text: self.title,
            category: format!("Server-{}", self.user_id),
            source: Some(QuoteSource::Server),
            id: Some(self.id),
        }
    }
}

/// Body of the batch push to `POST /posts`.
#[derive(Debug, Clone, Serialize)]
pub struct PushRequest<'a> {
    pub quotes: &'a [Quote],
    pub timestamp: DateTime<Utc>,
}
