//! Quotebook Core - Domain entities, services, and traits.
//!
//! This crate contains the quote store and the remote sync engine.
//! It is storage- and transport-agnostic: persistence is provided by
//! `storage-sqlite` and the remote endpoint by `remote-sync`, both through
//! the traits defined here.

pub mod errors;
pub mod quotes;
pub mod session;
pub mod storage;
pub mod sync;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
