//! Repository Module
//!
//! One thin repository per entity family. Ordering semantics (append,
//! compaction, moves, partition transfer) are delegated to
//! [`crate::ordering`]; repositories contribute the entity-specific reads,
//! writes and validations.

pub mod admin;
pub mod award;
pub mod blog;
pub mod event;
pub mod hero;
pub mod home_event;
pub mod page_event;
pub mod season;
pub mod sponsor;
pub mod timeline;

pub use admin::AdminRepository;
pub use award::AwardRepository;
pub use blog::BlogRepository;
pub use event::EventRepository;
pub use hero::HeroRepository;
pub use home_event::HomeEventRepository;
pub use page_event::PageEventRepository;
pub use season::SeasonRepository;
pub use sponsor::SponsorRepository;
pub use timeline::TimelineRepository;

use serde::Serialize;
use serde::de::DeserializeOwned;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;
use thiserror::Error;

use crate::ordering::{OrderingError, TxError};

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Atomic script aborted; nothing was applied, safe to retry.
    #[error("Transaction failed: {0}")]
    Transaction(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<TxError> for RepoError {
    fn from(err: TxError) -> Self {
        match err {
            TxError::Conflict(msg) => RepoError::Transaction(msg),
            TxError::Db(msg) => RepoError::Database(msg),
        }
    }
}

impl From<OrderingError> for RepoError {
    fn from(err: OrderingError) -> Self {
        match err {
            OrderingError::NotFound(msg) => RepoError::NotFound(msg),
            OrderingError::InvalidTarget(msg) => RepoError::Validation(msg),
            OrderingError::Tx(tx) => tx.into(),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Build a record pointer from table and key.
pub fn make_thing(table: &str, id: &str) -> Thing {
    Thing::from((table.to_string(), id.to_string()))
}

/// Extract the pure key if the id carries a table prefix
/// (e.g. "event:xyz" -> "xyz").
pub fn strip_table_prefix<'a>(table: &str, id: &'a str) -> &'a str {
    id.strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id)
}

/// Base repository with database reference and shared CRUD plumbing
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }

    /// Fetch a record by key.
    pub async fn get<T: DeserializeOwned>(&self, table: &str, id: &str) -> RepoResult<Option<T>> {
        let pure_id = strip_table_prefix(table, id);
        let record: Option<T> = self.db.select((table, pure_id)).await?;
        Ok(record)
    }

    /// Create a record from its full content.
    pub async fn create<T>(&self, table: &str, data: T) -> RepoResult<T>
    where
        T: Serialize + DeserializeOwned + Send + Sync + 'static,
    {
        let created: Option<T> = self.db.create(table).content(data).await?;
        created.ok_or_else(|| RepoError::Database(format!("Failed to create {table} record")))
    }

    /// Merge partial update data into a record and stamp `updated_at`, then
    /// return the fresh record. `None` fields of the DTO are skipped by
    /// serde and therefore untouched.
    pub async fn merge<T, D>(&self, table: &str, id: &str, data: &D, now: i64) -> RepoResult<T>
    where
        T: DeserializeOwned,
        D: Serialize,
    {
        let pure_id = strip_table_prefix(table, id);
        let mut patch = serde_json::to_value(data)
            .map_err(|e| RepoError::Database(format!("Failed to serialize update: {e}")))?;
        let Some(fields) = patch.as_object_mut() else {
            return Err(RepoError::Database("update payload is not an object".to_string()));
        };
        fields.insert("updated_at".to_string(), serde_json::json!(now));

        let thing = make_thing(table, pure_id);
        self.db
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", thing))
            .bind(("data", patch))
            .await?
            .check()?;

        self.get(table, pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("{table} {id} not found")))
    }

    /// Hard delete; returns the deleted record if it existed.
    pub async fn remove<T: DeserializeOwned>(&self, table: &str, id: &str) -> RepoResult<Option<T>> {
        let pure_id = strip_table_prefix(table, id);
        let deleted: Option<T> = self.db.delete((table, pure_id)).await?;
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_only_matching_prefix() {
        assert_eq!(strip_table_prefix("event", "event:abc"), "abc");
        assert_eq!(strip_table_prefix("event", "abc"), "abc");
        // a different table's prefix is not stripped
        assert_eq!(strip_table_prefix("event", "sponsor:abc"), "sponsor:abc");
    }
}
