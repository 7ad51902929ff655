//! Database model for local storage entries.

use diesel::prelude::*;

/// One persisted key/value pair. Values are JSON documents owned by the
/// quote store; this layer never looks inside them.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::local_storage)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LocalStorageEntryDB {
    pub storage_key: String,
    pub storage_value: String,
    pub updated_at: String,
}
