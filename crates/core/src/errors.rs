//! Core error types for Quotebook.
//!
//! This module defines storage- and transport-agnostic error types. Backend
//! specific errors (Diesel, SQLite, reqwest) are converted to these types by
//! the crates that own those backends.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the quote store and sync engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Payload is not parseable or does not have the expected shape.
    #[error("Invalid format: {0}")]
    Format(String),

    /// Network failure or non-success status from the remote endpoint.
    #[error("Remote sync failed: {0}")]
    Transport(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Database-agnostic error type for storage operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Errors raised when user input is rejected before touching the store.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),
}

impl Error {
    pub fn format(message: impl Into<String>) -> Self {
        Error::Format(message.into())
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Error::Transport(message.into())
    }

    pub fn missing_field(field: &str) -> Self {
        Error::Validation(ValidationError::MissingField(field.to_string()))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Format(err.to_string())
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
