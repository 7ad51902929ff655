//! SQLite storage implementation for Quotebook.
//!
//! Persists the quote store's key/value entries with Diesel on SQLite and
//! implements `LocalStorageRepositoryTrait` from `quotebook-core`. This is the
//! only crate in the workspace that depends on Diesel.
//!
//! ```text
//! core (quote store)
//!        │
//!        ▼
//! storage-sqlite (this crate)
//!        │
//!        ▼
//!    SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

pub mod local_storage;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, DbConnection, DbPool, WriteHandle,
};

pub use errors::{IntoCore, StorageError};
pub use local_storage::LocalStorageRepository;

pub use quotebook_core::errors::{DatabaseError, Error, Result};
