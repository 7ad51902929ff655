//! Key/value storage backing the quote store.

mod model;
mod repository;


pub use model::LocalStorageEntryDB;
pub use repository::LocalStorageRepository;
