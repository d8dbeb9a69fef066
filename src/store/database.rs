//! LibSQL backed record store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libsql::{Connection, Row, params};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::store::error::DbError;
use crate::store::schema;
use crate::store::{Fields, Record, RecordSink};

/// Length of generated record ids
pub const RECORD_ID_LEN: usize = 15;

/// Database manager for the record store
#[derive(Clone)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Create a new database manager
    #[instrument(skip(conn))]
    pub async fn new(conn: Connection) -> Result<Self, DbError> {
        schema::initialize_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Create a new database manager from a path
    pub async fn new_from_path(path: &str) -> Result<Self, DbError> {
        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DbError::Connection(format!("Failed to open database: {}", e)))?;

        let conn = db
            .connect()
            .map_err(|e| DbError::Connection(format!("Failed to connect to database: {}", e)))?;

        Self::new(conn).await
    }

    /// Create the collection if it does not exist yet
    #[instrument(skip(self))]
    pub async fn ensure_collection(&self, name: &str) -> Result<(), DbError> {
        let inserted = self
            .conn
            .execute(
                "INSERT INTO collections (name, created) VALUES (?, ?)
                 ON CONFLICT(name) DO NOTHING",
                params![name, Utc::now().to_rfc3339()],
            )
            .await
            .map_err(|e| DbError::Query(format!("Failed to create collection: {}", e)))?;

        if inserted > 0 {
            info!("Created collection '{}'", name);
        }
        Ok(())
    }

    /// Whether a collection with this name exists
    pub async fn collection_exists(&self, name: &str) -> Result<bool, DbError> {
        let mut rows = self
            .conn
            .query("SELECT 1 FROM collections WHERE name = ?", params![name])
            .await
            .map_err(|e| DbError::Query(format!("Failed to look up collection: {}", e)))?;

        match rows.next().await {
            Ok(row) => Ok(row.is_some()),
            Err(e) => Err(DbError::Data(format!("Failed to look up collection: {}", e))),
        }
    }

    /// Number of records in a collection
    pub async fn count_records(&self, collection: &str) -> Result<i64, DbError> {
        let mut rows = self
            .conn
            .query(
                "SELECT COUNT(*) FROM records WHERE collection = ?",
                params![collection],
            )
            .await
            .map_err(|e| DbError::Query(format!("Failed to count records: {}", e)))?;

        let row = match rows.next().await {
            Ok(Some(row)) => row,
            Ok(None) => return Err(DbError::Data("No count returned".to_string())),
            Err(e) => return Err(DbError::Data(format!("Failed to count records: {}", e))),
        };

        row.get(0)
            .map_err(|e| DbError::Data(format!("Failed to read count: {}", e)))
    }

    fn row_to_record(&self, row: &Row) -> Result<Record, DbError> {
        let id: String = row
            .get(0)
            .map_err(|e| DbError::Data(format!("Failed to get id: {}", e)))?;
        let collection: String = row
            .get(1)
            .map_err(|e| DbError::Data(format!("Failed to get collection: {}", e)))?;
        let fields: String = row
            .get(2)
            .map_err(|e| DbError::Data(format!("Failed to get fields: {}", e)))?;
        let created: String = row
            .get(3)
            .map_err(|e| DbError::Data(format!("Failed to get created: {}", e)))?;
        let updated: String = row
            .get(4)
            .map_err(|e| DbError::Data(format!("Failed to get updated: {}", e)))?;

        let fields: Fields = serde_json::from_str(&fields)
            .map_err(|e| DbError::Data(format!("Failed to decode fields of {}: {}", id, e)))?;

        Ok(Record {
            id,
            collection,
            created: parse_timestamp(&created)?,
            updated: parse_timestamp(&updated)?,
            fields,
        })
    }
}

#[async_trait]
impl RecordSink for Database {
    #[instrument(skip(self, fields))]
    async fn create_record(&self, collection: &str, fields: Fields) -> Result<String, DbError> {
        if !self.collection_exists(collection).await? {
            return Err(DbError::CollectionNotFound(collection.to_string()));
        }

        let id = generate_record_id();
        let now = Utc::now().to_rfc3339();
        let encoded = serde_json::to_string(&fields)
            .map_err(|e| DbError::Data(format!("Failed to encode fields: {}", e)))?;

        self.conn
            .execute(
                "INSERT INTO records (id, collection, fields, created, updated)
                 VALUES (?, ?, ?, ?, ?)",
                params![id.clone(), collection, encoded, now.clone(), now],
            )
            .await
            .map_err(|e| DbError::Query(format!("Failed to save record: {}", e)))?;

        debug!("Saved record {} in '{}'", id, collection);
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn get_record(&self, collection: &str, id: &str) -> Result<Option<Record>, DbError> {
        if !self.collection_exists(collection).await? {
            return Err(DbError::CollectionNotFound(collection.to_string()));
        }

        let mut rows = self
            .conn
            .query(
                "SELECT id, collection, fields, created, updated
                 FROM records
                 WHERE collection = ? AND id = ?",
                params![collection, id],
            )
            .await
            .map_err(|e| DbError::Query(format!("Failed to get record: {}", e)))?;

        match rows.next().await {
            Ok(Some(row)) => Ok(Some(self.row_to_record(&row)?)),
            Ok(None) => Ok(None),
            Err(e) => Err(DbError::Data(format!("Failed to get record: {}", e))),
        }
    }
}

/// A random 15 character id of lowercase hex digits
fn generate_record_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(RECORD_ID_LEN);
    id
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| DbError::Data(format!("Invalid timestamp '{}': {}", value, e)))
}
