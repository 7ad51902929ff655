use async_trait::async_trait;

use crate::errors::Result;
use crate::quotes::Quote;
use crate::sync::sync_model::PushAck;

/// A remote quote collection the store can be synced with.
///
/// Implementations report every network, status and decoding failure as
/// `Error::Transport`. Nothing is retried.
#[async_trait]
pub trait RemoteQuoteSourceTrait: Send + Sync {
    /// Fetch a bounded batch of remote quotes, tagged `source = server`.
    async fn fetch_remote(&self) -> Result<Vec<Quote>>;

    /// Send local records as a single batch; succeeds or fails as one unit.
    async fn push_local(&self, quotes: &[Quote]) -> Result<PushAck>;
}
