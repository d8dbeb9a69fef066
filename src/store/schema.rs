//! # Record Store Schema
//!
//! Two tables back the document store:
//! 1. `collections` - named buckets records are written into
//! 2. `records` - one row per record, fields kept as a JSON object
//!
//! Records reference their collection by name and go away with it.

use crate::store::error::DbError;
use libsql::{Connection, params};

/// Initialize the database schema
pub async fn initialize_schema(conn: &Connection) -> Result<(), DbError> {
    conn.execute("PRAGMA foreign_keys = ON", params![])
        .await
        .map_err(|e| DbError::Schema(format!("Failed to enable foreign keys: {}", e)))?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS collections (
            name TEXT PRIMARY KEY,
            created TEXT NOT NULL
        )",
        params![],
    )
    .await
    .map_err(|e| DbError::Schema(format!("Failed to create collections table: {}", e)))?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS records (
            id TEXT PRIMARY KEY,
            collection TEXT NOT NULL,
            fields TEXT NOT NULL,
            created TEXT NOT NULL,
            updated TEXT NOT NULL,
            FOREIGN KEY (collection) REFERENCES collections(name) ON DELETE CASCADE
        )",
        params![],
    )
    .await
    .map_err(|e| DbError::Schema(format!("Failed to create records table: {}", e)))?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_records_collection ON records(collection)",
        params![],
    )
    .await
    .map_err(|e| DbError::Schema(format!("Failed to create index on records: {}", e)))?;

    Ok(())
}
