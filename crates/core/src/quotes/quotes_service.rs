use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::quotes_constants::{
    ALL_CATEGORIES, DEFAULT_QUOTES, QUOTES_STORAGE_KEY, SYNC_STATE_STORAGE_KEY,
};
use super::quotes_model::{
    distinct_categories, pick_random, LocalChanges, NewQuote, Quote, RemoteApplyResult, SyncState,
};
use super::quotes_traits::QuoteServiceTrait;
use crate::errors::{Error, Result, ValidationError};
use crate::session::{SessionState, SessionStore};
use crate::storage::LocalStorageRepositoryTrait;
use crate::sync::merge_quotes;

/// In-memory view of everything the store persists.
#[derive(Debug, Clone)]
struct QuoteBook {
    quotes: Vec<Quote>,
    sync_state: SyncState,
    /// Bumped on every local mutation; never persisted.
    generation: u64,
}

/// Owned quote store backed by a local storage repository.
pub struct QuoteService {
    repository: Arc<dyn LocalStorageRepositoryTrait>,
    book: RwLock<QuoteBook>,
    session: SessionStore,
}

impl QuoteService {
    /// Restores the persisted collection, seeding the defaults when nothing
    /// usable is stored.
    pub async fn load(repository: Arc<dyn LocalStorageRepositoryTrait>) -> Result<Self> {
        let stored_quotes = read_json::<Vec<Quote>>(repository.as_ref(), QUOTES_STORAGE_KEY)?;
        let sync_state = read_json::<SyncState>(repository.as_ref(), SYNC_STATE_STORAGE_KEY)?
            .unwrap_or_default();

        let service = match stored_quotes {
            Some(quotes) => {
                debug!("Loaded {} quotes from local storage", quotes.len());
                Self::with_book(repository, quotes, sync_state)
            }
            None => {
                info!("No stored quotes found, seeding default collection");
                let service = Self::with_book(repository, default_quotes(), sync_state);
                {
                    let book = service.book.read().await;
                    service.persist(&book, true, true).await?;
                }
                service
            }
        };
        Ok(service)
    }

    fn with_book(
        repository: Arc<dyn LocalStorageRepositoryTrait>,
        quotes: Vec<Quote>,
        sync_state: SyncState,
    ) -> Self {
        QuoteService {
            repository,
            book: RwLock::new(QuoteBook {
                quotes,
                sync_state,
                generation: 0,
            }),
            session: SessionStore::new(),
        }
    }

    /// Writes the requested keys of `book` in one storage transaction.
    async fn persist(&self, book: &QuoteBook, quotes: bool, sync_state: bool) -> Result<()> {
        let mut items = Vec::with_capacity(2);
        if quotes {
            items.push((
                QUOTES_STORAGE_KEY.to_string(),
                serde_json::to_string(&book.quotes)?,
            ));
        }
        if sync_state {
            items.push((
                SYNC_STATE_STORAGE_KEY.to_string(),
                serde_json::to_string(&book.sync_state)?,
            ));
        }
        if items.is_empty() {
            return Ok(());
        }
        self.repository.set_items(items).await
    }

    /// Appends `quotes` as a local mutation. Memory is only updated once the
    /// write has succeeded.
    async fn append_local(&self, quotes: Vec<Quote>) -> Result<()> {
        let mut book = self.book.write().await;
        let mut next = book.clone();
        next.quotes.extend(quotes);
        next.sync_state.pending_changes = true;
        next.generation += 1;
        self.persist(&next, true, true).await?;
        *book = next;
        self.session.record_update(Utc::now());
        Ok(())
    }
}

#[async_trait]
impl QuoteServiceTrait for QuoteService {
    async fn get_quotes(&self) -> Vec<Quote> {
        self.book.read().await.quotes.clone()
    }

    async fn save(&self) -> Result<()> {
        let mut book = self.book.write().await;
        let mut next = book.clone();
        next.sync_state.pending_changes = true;
        next.generation += 1;
        self.persist(&next, true, true).await?;
        *book = next;
        Ok(())
    }

    async fn add_quote(&self, new_quote: NewQuote) -> Result<Quote> {
        let text = new_quote.text.trim();
        let category = new_quote.category.trim();
        if text.is_empty() {
            return Err(Error::missing_field("text"));
        }
        if category.is_empty() {
            return Err(Error::missing_field("category"));
        }

        let quote = Quote::local(text, category);
        self.append_local(vec![quote.clone()]).await?;
        self.session.record_view(&quote);
        debug!("Added quote in category '{}'", quote.category);
        Ok(quote)
    }

    async fn import_quotes(&self, quotes: Vec<NewQuote>) -> Result<usize> {
        let count = quotes.len();
        let imported: Vec<Quote> = quotes.into_iter().map(Quote::from).collect();
        self.append_local(imported).await?;
        info!("Imported {} quotes", count);
        Ok(count)
    }

    async fn import_json(&self, payload: &str) -> Result<usize> {
        let value: serde_json::Value = serde_json::from_str(payload)
            .map_err(|e| Error::format(format!("Import file is not valid JSON: {}", e)))?;
        let records = match value {
            serde_json::Value::Array(records) => records,
            _ => {
                return Err(Error::format(
                    "Import file must contain a JSON array of quotes",
                ))
            }
        };

        let quotes = records
            .into_iter()
            .enumerate()
            .map(|(idx, record)| {
                serde_json::from_value::<NewQuote>(record)
                    .map_err(|e| Error::format(format!("Invalid quote at index {}: {}", idx, e)))
            })
            .collect::<Result<Vec<_>>>()?;

        self.import_quotes(quotes).await
    }

    async fn export_json(&self) -> Result<String> {
        let book = self.book.read().await;
        Ok(serde_json::to_string_pretty(&book.quotes)?)
    }

    async fn pick_random(&self, category: &str) -> Option<Quote> {
        let picked = {
            let book = self.book.read().await;
            let mut rng = rand::thread_rng();
            pick_random(&book.quotes, category, &mut rng).cloned()
        };
        if let Some(quote) = &picked {
            self.session.record_view(quote);
        }
        picked
    }

    async fn get_categories(&self) -> Vec<String> {
        distinct_categories(&self.book.read().await.quotes)
    }

    async fn get_sync_state(&self) -> SyncState {
        self.book.read().await.sync_state.clone()
    }

    async fn set_selected_category(&self, category: &str) -> Result<SyncState> {
        let category = category.trim();
        if category.is_empty() {
            return Err(ValidationError::InvalidInput(format!(
                "Category must be '{}' or a category name",
                ALL_CATEGORIES
            ))
            .into());
        }

        let mut book = self.book.write().await;
        let mut next = book.clone();
        next.sync_state.selected_category = category.to_string();
        self.persist(&next, false, true).await?;
        *book = next;
        Ok(book.sync_state.clone())
    }

    async fn get_session(&self) -> SessionState {
        self.session.get()
    }

    async fn local_changes(&self) -> LocalChanges {
        let book = self.book.read().await;
        LocalChanges {
            quotes: book.quotes.iter().filter(|q| q.is_local()).cloned().collect(),
            generation: book.generation,
            pending: book.sync_state.pending_changes,
        }
    }

    async fn apply_remote(
        &self,
        remote: Vec<Quote>,
        pushed_generation: Option<u64>,
    ) -> Result<RemoteApplyResult> {
        let mut book = self.book.write().await;
        let merged = merge_quotes(&book.quotes, &remote);
        let changed = merged != book.quotes;

        let mut next = book.clone();
        let pending_cleared = next.sync_state.pending_changes
            && pushed_generation.is_some_and(|generation| generation == book.generation);
        if pending_cleared {
            next.sync_state.pending_changes = false;
        }
        next.sync_state.last_sync_time = Some(Utc::now());
        if changed {
            next.quotes = merged;
        }

        self.persist(&next, changed, true).await?;
        let total = next.quotes.len();
        *book = next;

        if changed {
            self.session.record_update(Utc::now());
        }

        Ok(RemoteApplyResult {
            changed,
            total,
            pending_cleared,
        })
    }
}

fn default_quotes() -> Vec<Quote> {
    DEFAULT_QUOTES
        .iter()
        .map(|(text, category)| Quote::new(*text, *category))
        .collect()
}

/// Reads and decodes a stored JSON value. Undecodable data is treated as absent.
fn read_json<T: DeserializeOwned>(
    repository: &dyn LocalStorageRepositoryTrait,
    key: &str,
) -> Result<Option<T>> {
    let Some(raw) = repository.get_item(key)? else {
        return Ok(None);
    };
    match serde_json::from_str::<T>(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!(
                "Stored value for '{}' could not be parsed, falling back to defaults: {}",
                key, e
            );
            Ok(None)
        }
    }
}
