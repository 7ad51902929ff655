use async_trait::async_trait;

use crate::errors::Result;
use crate::quotes::quotes_model::{
    LocalChanges, NewQuote, Quote, RemoteApplyResult, SyncState,
};
use crate::session::SessionState;

/// Trait for quote store operations.
#[async_trait]
pub trait QuoteServiceTrait: Send + Sync {
    async fn get_quotes(&self) -> Vec<Quote>;

    /// Persist the full collection and sync state, marking local changes pending.
    async fn save(&self) -> Result<()>;

    /// Append a user-entered quote. Both fields must be non-empty after trimming.
    async fn add_quote(&self, new_quote: NewQuote) -> Result<Quote>;

    /// Append every record, tagged as local. Returns the number imported.
    async fn import_quotes(&self, quotes: Vec<NewQuote>) -> Result<usize>;

    /// Parse an uploaded file and import it. The top level must be a JSON array.
    async fn import_json(&self, payload: &str) -> Result<usize>;

    /// Pretty-printed JSON array of the current collection.
    async fn export_json(&self) -> Result<String>;

    /// Uniformly random quote in `category` (`"all"` for any), `None` if the subset is empty.
    async fn pick_random(&self, category: &str) -> Option<Quote>;

    async fn get_categories(&self) -> Vec<String>;

    async fn get_sync_state(&self) -> SyncState;

    async fn set_selected_category(&self, category: &str) -> Result<SyncState>;

    async fn get_session(&self) -> SessionState;

    /// Local-only records and the generation they were read at.
    async fn local_changes(&self) -> LocalChanges;

    /// Merge a fetched remote collection into the live store.
    ///
    /// `pushed_generation` is the generation of a snapshot the remote has
    /// acknowledged; the pending flag is only cleared if it is still current.
    async fn apply_remote(
        &self,
        remote: Vec<Quote>,
        pushed_generation: Option<u64>,
    ) -> Result<RemoteApplyResult>;
}
