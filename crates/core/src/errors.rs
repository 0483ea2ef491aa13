//! Core error types for the Ratesync application.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer,
//! and rate source failures are mapped one-to-one from `RateSourceError`.

use ratesync_market_data::RateSourceError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the sync pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// The upstream provider could not be reached.
    #[error("Connectivity error: {0}")]
    Connectivity(String),

    /// The upstream provider answered with a non-success status.
    #[error("Upstream error ({status}): {body}")]
    Upstream { status: u16, body: String },

    /// The upstream payload does not have the expected shape.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
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

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A value does not fit the column definition.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl From<RateSourceError> for Error {
    fn from(err: RateSourceError) -> Self {
        match err {
            RateSourceError::Connectivity(msg) => Error::Connectivity(msg),
            RateSourceError::Upstream { status, body } => Error::Upstream { status, body },
            RateSourceError::InvalidData(msg) => Error::InvalidData(msg),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Unexpected(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_errors_map_to_same_kind() {
        let err: Error = RateSourceError::Upstream {
            status: 502,
            body: "bad gateway".to_string(),
        }
        .into();
        assert!(matches!(err, Error::Upstream { status: 502, ref body } if body == "bad gateway"));

        let err: Error = RateSourceError::Connectivity("refused".to_string()).into();
        assert!(matches!(err, Error::Connectivity(ref msg) if msg == "refused"));

        let err: Error = RateSourceError::InvalidData("eof".to_string()).into();
        assert!(matches!(err, Error::InvalidData(_)));
    }
}
