//! Transaction script builder
//!
//! SurrealDB executes a multi-statement query wrapped in
//! `BEGIN TRANSACTION … COMMIT TRANSACTION` as one atomic unit: either every
//! statement applies, or a failed statement (including an explicit `THROW`)
//! rolls the whole script back. The ordering manager funnels every
//! multi-record mutation through this builder so that a half-applied shift
//! set can never become visible.
//!
//! Guard statements inside the scripts `THROW` messages prefixed with
//! `conflict:` when they detect that the world changed between the
//! handler-level read and the transaction (record vanished, target position
//! no longer valid). Those aborts — like engine-level read/write conflicts —
//! are classified as [`TxError::Conflict`]: the client may retry, nothing
//! was applied.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;
use thiserror::Error;

/// Failure of an atomic script. Neither variant leaves partial state.
#[derive(Debug, Error)]
pub enum TxError {
    /// The script aborted because a guard tripped or the storage engine
    /// detected concurrent modification. Safe to retry.
    #[error("transaction conflict: {0}")]
    Conflict(String),

    /// The store itself failed (I/O, serialization, connection).
    #[error("store error: {0}")]
    Db(String),
}

impl TxError {
    pub fn db(err: impl ToString) -> Self {
        Self::Db(err.to_string())
    }
}

/// A bound query parameter. Only the shapes the ordering scripts need.
#[derive(Debug, Clone)]
pub enum BindValue {
    Thing(Thing),
    Str(String),
    Int(i64),
    Bool(bool),
}

impl From<Thing> for BindValue {
    fn from(v: Thing) -> Self {
        Self::Thing(v)
    }
}

impl From<String> for BindValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for BindValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<i64> for BindValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for BindValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// Accumulates statements and bindings, then runs them as one transaction.
#[derive(Debug, Default)]
pub struct Tx {
    statements: Vec<String>,
    bindings: Vec<(String, BindValue)>,
}

impl Tx {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a statement (without trailing semicolon).
    pub fn stmt(mut self, sql: impl Into<String>) -> Self {
        self.statements.push(sql.into());
        self
    }

    pub fn bind(mut self, key: impl Into<String>, value: impl Into<BindValue>) -> Self {
        self.bindings.push((key.into(), value.into()));
        self
    }

    /// Execute the accumulated script atomically.
    pub async fn run(self, db: &Surreal<Db>) -> Result<(), TxError> {
        let mut script = String::from("BEGIN TRANSACTION;\n");
        for stmt in &self.statements {
            script.push_str(stmt);
            script.push_str(";\n");
        }
        script.push_str("COMMIT TRANSACTION;");

        let mut query = db.query(script);
        for (key, value) in self.bindings {
            query = match value {
                BindValue::Thing(v) => query.bind((key, v)),
                BindValue::Str(v) => query.bind((key, v)),
                BindValue::Int(v) => query.bind((key, v)),
                BindValue::Bool(v) => query.bind((key, v)),
            };
        }

        let response = query.await.map_err(classify)?;
        response.check().map_err(classify)?;
        Ok(())
    }
}

/// Separate retryable aborts from genuine store failures.
fn classify(err: surrealdb::Error) -> TxError {
    let msg = err.to_string();
    if msg.to_lowercase().contains("conflict") {
        TxError::Conflict(msg)
    } else {
        TxError::Db(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surrealdb::engine::local::Mem;

    async fn mem_db() -> Surreal<Db> {
        let db = Surreal::new::<Mem>(()).await.unwrap();
        db.use_ns("test").use_db("test").await.unwrap();
        db
    }

    #[tokio::test]
    async fn commits_all_statements() {
        let db = mem_db().await;
        Tx::new()
            .stmt("CREATE item:one SET label = $label, sort_order = 0")
            .stmt("CREATE item:two SET label = $label, sort_order = 1")
            .bind("label", "x")
            .run(&db)
            .await
            .unwrap();

        let mut resp = db.query("SELECT count() FROM item GROUP ALL").await.unwrap();
        let count: Option<i64> = resp.take((0, "count")).unwrap();
        assert_eq!(count, Some(2));
    }

    #[tokio::test]
    async fn throw_rolls_back_everything() {
        let db = mem_db().await;
        let err = Tx::new()
            .stmt("CREATE item:one SET sort_order = 0")
            .stmt("THROW \"conflict: guard tripped\"")
            .stmt("CREATE item:two SET sort_order = 1")
            .run(&db)
            .await
            .unwrap_err();

        assert!(matches!(err, TxError::Conflict(_)), "got {err:?}");

        // the first CREATE must not have survived
        let mut resp = db.query("SELECT count() FROM item GROUP ALL").await.unwrap();
        let count: Option<i64> = resp.take((0, "count")).unwrap();
        assert_eq!(count.unwrap_or(0), 0);
    }
}
