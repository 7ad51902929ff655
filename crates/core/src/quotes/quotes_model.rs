//! Quote domain models.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::quotes_constants::ALL_CATEGORIES;

/// Provenance of a quote record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteSource {
    Local,
    Server,
}

/// Domain model representing a quote.
///
/// `text` is the identity key when merging with the remote collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub text: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<QuoteSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl Quote {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
            source: None,
            id: None,
        }
    }

    pub fn local(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            source: Some(QuoteSource::Local),
            ..Self::new(text, category)
        }
    }

    /// True for records that have never been confirmed by the remote endpoint.
    pub fn is_local(&self) -> bool {
        !matches!(self.source, Some(QuoteSource::Server))
    }
}

/// Input model for adding or importing a quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuote {
    pub text: String,
    pub category: String,
    #[serde(default)]
    pub id: Option<i64>,
}

impl NewQuote {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
            id: None,
        }
    }
}

impl From<NewQuote> for Quote {
    fn from(new_quote: NewQuote) -> Self {
        Self {
            text: new_quote.text,
            category: new_quote.category,
            source: Some(QuoteSource::Local),
            id: new_quote.id,
        }
    }
}

/// Sync bookkeeping persisted alongside the quote collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncState {
    pub selected_category: String,
    pub last_sync_time: Option<DateTime<Utc>>,
    pub pending_changes: bool,
}

impl Default for SyncState {
    fn default() -> Self {
        Self {
            selected_category: ALL_CATEGORIES.to_string(),
            last_sync_time: None,
            pending_changes: false,
        }
    }
}

/// Snapshot of the records a sync cycle should push.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalChanges {
    /// Records with `source` absent or `local`, in collection order.
    pub quotes: Vec<Quote>,
    /// Mutation generation the snapshot was taken at.
    pub generation: u64,
    pub pending: bool,
}

/// What happened when a remote collection was merged into the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteApplyResult {
    /// Whether the merged collection replaced the stored one.
    pub changed: bool,
    pub total: usize,
    pub pending_cleared: bool,
}

/// Picks one quote uniformly at random from those matching `category`.
///
/// `"all"` selects from the whole collection. Returns `None` when the
/// filtered subset is empty.
pub fn pick_random<'a, R: Rng + ?Sized>(
    quotes: &'a [Quote],
    category: &str,
    rng: &mut R,
) -> Option<&'a Quote> {
    if category == ALL_CATEGORIES {
        return quotes.choose(rng);
    }
    let filtered: Vec<&Quote> = quotes.iter().filter(|q| q.category == category).collect();
    filtered.choose(rng).copied()
}

/// Distinct categories in first-seen order.
pub fn distinct_categories(quotes: &[Quote]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for quote in quotes {
        if !categories.iter().any(|c| c == &quote.category) {
            categories.push(quote.category.clone());
        }
    }
    categories
}
