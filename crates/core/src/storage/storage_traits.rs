//! Repository traits for local storage.

use async_trait::async_trait;

use crate::errors::Result;

/// Durable string key/value storage, the backend equivalent of browser local storage.
#[async_trait]
pub trait LocalStorageRepositoryTrait: Send + Sync {
    /// Get a single value by key. Returns `None` if the key was never written.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Write several keys in one transaction, overwriting prior values.
    async fn set_items(&self, items: Vec<(String, String)>) -> Result<()>;
}
