//! Core error types for atlas.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use atlas_sources::SourceError;
use thiserror::Error;

use crate::filters::FilterError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for atlas.
#[derive(Error, Debug)]
pub enum Error {
    /// An upstream source could not be fetched or understood. The refresh
    /// that hit it was aborted and stored data is unchanged.
    #[error("{0}")]
    SourceUnavailable(#[from] SourceError),

    /// A read filter was malformed or named a column that is not allowed.
    #[error("Invalid filter: {0}")]
    Filter(#[from] FilterError),

    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    /// A single-entity lookup or delete matched no row.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid GDP multiplier {0}: must be between 1000 and 2000")]
    InvalidMultiplier(u32),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
/// Every variant is a persistence failure; writes that fail are rolled back.
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

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A database transaction failed and was rolled back.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl Error {
    /// True for errors caused by the caller's input rather than the system.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Filter(_) | Error::NotFound(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Database(DatabaseError::Internal(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_keeps_endpoint_in_message() {
        let err: Error = SourceError::Timeout {
            endpoint: "https://open.er-api.com/v6/latest/USD".to_string(),
        }
        .into();
        assert!(matches!(err, Error::SourceUnavailable(_)));
        assert!(err.to_string().contains("open.er-api.com"));
    }

    #[test]
    fn test_client_errors() {
        assert!(Error::NotFound("Atlantis".to_string()).is_client_error());
        assert!(Error::Filter(FilterError::UnknownFilterField("id".to_string())).is_client_error());
        assert!(!Error::Database(DatabaseError::QueryFailed("boom".to_string())).is_client_error());
    }
}
