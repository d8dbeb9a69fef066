//! Record store module
//!
//! A small document store: records live in named collections, carry an
//! arbitrary JSON field map and get a generated id when they are created.
//! `RecordSink` is the seam the HTTP layer writes through; `Database` is the
//! embedded LibSQL implementation.

mod database;
pub mod error;
mod schema;

pub use database::{Database, RECORD_ID_LEN};
pub use error::DbError;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Field map of a record
pub type Fields = Map<String, Value>;

/// A stored record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Generated identifier
    pub id: String,

    /// Name of the collection the record belongs to
    #[serde(rename = "collectionName")]
    pub collection: String,

    /// Creation time
    pub created: DateTime<Utc>,

    /// Last update time
    pub updated: DateTime<Utc>,

    /// Record fields
    #[serde(flatten)]
    pub fields: Fields,
}

/// Destination for records
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Store `fields` as a new record in `collection` and return its id
    async fn create_record(&self, collection: &str, fields: Fields) -> Result<String, DbError>;

    /// Look up a record by collection and id
    async fn get_record(&self, collection: &str, id: &str) -> Result<Option<Record>, DbError>;
}
