//! Remote sync - merge reducer, sync cycle orchestration and traits.

mod merge;
mod sync_model;
mod sync_service;
mod sync_traits;


pub use merge::merge_quotes;
pub use sync_model::{PushAck, SyncOutcome, SyncPhase, SyncStatus};
pub use sync_service::QuoteSyncService;
pub use sync_traits::RemoteQuoteSourceTrait;
