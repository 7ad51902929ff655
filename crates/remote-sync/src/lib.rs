//! Remote quote source for Quotebook.
//!
//! Talks to a JSON placeholder style `/posts` endpoint: posts are fetched and
//! mapped to server-tagged quotes, and local-only quotes are pushed back as a
//! single batch.

pub mod client;
pub mod error;
pub mod types;

pub use client::RemoteQuoteClient;
pub use error::{RemoteSyncError, Result};
pub use types::{PushRequest, RemotePost, REMOTE_FETCH_LIMIT};
