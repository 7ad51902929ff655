use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;

use super::model::LocalStorageEntryDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::local_storage::dsl::*;
use quotebook_core::errors::Result;
use quotebook_core::storage::LocalStorageRepositoryTrait;

pub struct LocalStorageRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl LocalStorageRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        LocalStorageRepository { pool, writer }
    }
}

#[async_trait]
impl LocalStorageRepositoryTrait for LocalStorageRepository {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let mut conn = get_connection(&self.pool)?;
        let value = local_storage
            .find(key)
            .select(storage_value)
            .first::<String>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(value)
    }

    async fn set_items(&self, items: Vec<(String, String)>) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }
        self.writer
            .exec(move |conn| {
                let now = Utc::now().to_rfc3339();
                for (key, value) in items {
                    diesel::replace_into(local_storage)
                        .values(&LocalStorageEntryDB {
                            storage_key: key,
                            storage_value: value,
                            updated_at: now.clone(),
                        })
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(())
            })
            .await
    }
}
