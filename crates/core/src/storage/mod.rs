//! Durable key/value storage abstraction.

mod storage_traits;

pub use storage_traits::LocalStorageRepositoryTrait;
