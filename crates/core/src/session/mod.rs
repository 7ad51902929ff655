//! Session-scoped state: what the user last looked at.
//!
//! Lives for the lifetime of the process and is never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

use crate::quotes::Quote;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub last_viewed_quote: Option<Quote>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// In-memory session storage.
#[derive(Debug, Default)]
pub struct SessionStore {
    state: RwLock<SessionState>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> SessionState {
        match self.state.read() {
            Ok(state) => state.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn record_view(&self, quote: &Quote) {
        self.update(|state| state.last_viewed_quote = Some(quote.clone()));
    }

    pub fn record_update(&self, at: DateTime<Utc>) {
        self.update(|state| state.last_updated = Some(at));
    }

    fn update(&self, f: impl FnOnce(&mut SessionState)) {
        let mut guard = match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_view_and_update() {
        let store = SessionStore::new();
        assert_eq!(store.get(), SessionState::default());

        let quote = Quote::new("A", "Life");
        let now = Utc::now();
        store.record_view(&quote);
        store.record_update(now);

        let state = store.get();
        assert_eq!(state.last_viewed_quote, Some(quote));
        assert_eq!(state.last_updated, Some(now));
    }
}
