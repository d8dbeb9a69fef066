//! # Record Store Error Types
//!
//! Errors raised by the record store. Every variant fails the request that
//! caused it; the store never retries a write.

use thiserror::Error;

/// Error type for database operations
#[derive(Debug, Error)]
pub enum DbError {
    /// SQL query error
    #[error("SQL query error: {0}")]
    Query(String),

    /// Schema error
    #[error("Schema error: {0}")]
    Schema(String),

    /// Data error
    #[error("Data error: {0}")]
    Data(String),

    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// The collection a record was written to or read from does not exist
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),
}
