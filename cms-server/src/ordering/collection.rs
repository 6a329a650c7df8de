//! Generic ordered collection manager
//!
//! One instance per (entity table, partition) pair. Every mutation that can
//! touch more than one record runs as a single atomic script through
//! [`Tx`](super::tx::Tx); guard statements re-validate the world inside the
//! transaction so a stale handler-level read can only abort, never corrupt
//! the sequence.

use std::marker::PhantomData;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;
use thiserror::Error;

use super::UNORDERED;
use super::tx::{BindValue, Tx, TxError};

/// Binds an entity type to its table. The partition predicate is supplied
/// per manager instance via [`Partition`], since it may carry runtime state
/// (e.g. the timeline section a phase belongs to).
pub trait OrderedEntity: DeserializeOwned + Send + Sync + 'static {
    const TABLE: &'static str;
}

/// Failure of an ordering operation.
#[derive(Debug, Error)]
pub enum OrderingError {
    #[error("{0}")]
    NotFound(String),

    /// Target position outside `[0, n-1]`, or the record is parked outside
    /// the ordered partition. A client input error, not retryable.
    #[error("{0}")]
    InvalidTarget(String),

    #[error(transparent)]
    Tx(#[from] TxError),
}

/// The sibling set within which `sort_order` must stay dense.
///
/// `clause` selects the ordered partition; `complement` (when present)
/// selects the records parked outside it, which are listed by recency
/// instead. Both may reference bound parameters supplied with
/// [`Partition::bind`].
#[derive(Debug, Clone)]
pub struct Partition {
    clause: &'static str,
    complement: Option<&'static str>,
    binds: Vec<(&'static str, BindValue)>,
}

impl Partition {
    pub fn new(clause: &'static str, complement: Option<&'static str>) -> Self {
        Self { clause, complement, binds: Vec::new() }
    }

    /// The `is_active = true` partition shared by most entity families.
    pub fn active() -> Self {
        Self::new("is_active = true", Some("is_active = false"))
    }

    /// A family whose whole table is one ordered partition (no parked side).
    pub fn all() -> Self {
        Self::new("sort_order != -1", None)
    }

    pub fn bind(mut self, key: &'static str, value: impl Into<BindValue>) -> Self {
        self.binds.push((key, value.into()));
        self
    }
}

/// The two order-relevant fields of any record, read without knowing the
/// full entity shape. `is_active` is absent on families whose whole table
/// is ordered.
#[derive(Debug, Deserialize)]
struct OrderFields {
    sort_order: i64,
    #[serde(default)]
    is_active: Option<bool>,
}

pub struct OrderedCollection<'a, E> {
    db: &'a Surreal<Db>,
    partition: Partition,
    _entity: PhantomData<E>,
}

impl<'a, E: OrderedEntity> OrderedCollection<'a, E> {
    pub fn new(db: &'a Surreal<Db>, partition: Partition) -> Self {
        Self { db, partition, _entity: PhantomData }
    }

    pub fn record(id_key: &str) -> Thing {
        Thing::from((E::TABLE.to_string(), id_key.to_string()))
    }

    fn partition_tx(&self, mut tx: Tx) -> Tx {
        for (key, value) in &self.partition.binds {
            tx = tx.bind(*key, value.clone());
        }
        tx
    }

    async fn query(&self, sql: String, extra: Vec<(&'static str, BindValue)>) -> Result<surrealdb::Response, TxError> {
        let mut query = self.db.query(sql);
        for (key, value) in self.partition.binds.iter().cloned().chain(extra) {
            query = match value {
                BindValue::Thing(v) => query.bind((key, v)),
                BindValue::Str(v) => query.bind((key, v)),
                BindValue::Int(v) => query.bind((key, v)),
                BindValue::Bool(v) => query.bind((key, v)),
            };
        }
        query.await.map_err(TxError::db)
    }

    /// Number of records currently in the ordered partition.
    pub async fn len(&self) -> Result<i64, TxError> {
        let mut response = self
            .query(
                format!(
                    "SELECT count() FROM {} WHERE {} GROUP ALL",
                    E::TABLE,
                    self.partition.clause
                ),
                Vec::new(),
            )
            .await?;
        let count: Option<i64> = response.take((0, "count")).map_err(TxError::db)?;
        Ok(count.unwrap_or(0))
    }

    /// Position for a record appended at the end of the partition.
    pub async fn next_order(&self) -> Result<i64, TxError> {
        self.len().await
    }

    /// Partition records ascending by `sort_order`.
    pub async fn list_ordered(&self) -> Result<Vec<E>, TxError> {
        let mut response = self
            .query(
                format!(
                    "SELECT * FROM {} WHERE {} ORDER BY sort_order ASC",
                    E::TABLE,
                    self.partition.clause
                ),
                Vec::new(),
            )
            .await?;
        response.take(0).map_err(TxError::db)
    }

    /// Parked records by recency. Empty for whole-table partitions.
    pub async fn list_unordered(&self) -> Result<Vec<E>, TxError> {
        let Some(complement) = self.partition.complement else {
            return Ok(Vec::new());
        };
        let mut response = self
            .query(
                format!(
                    "SELECT * FROM {} WHERE {} ORDER BY updated_at DESC",
                    E::TABLE,
                    complement
                ),
                Vec::new(),
            )
            .await?;
        response.take(0).map_err(TxError::db)
    }

    /// Admin view: ordered partition first, then parked records by recency.
    pub async fn list_admin(&self) -> Result<Vec<E>, TxError> {
        let mut records = self.list_ordered().await?;
        records.extend(self.list_unordered().await?);
        Ok(records)
    }

    async fn order_fields(&self, rec: &Thing) -> Result<Option<OrderFields>, TxError> {
        let mut response = self
            .query(
                "SELECT sort_order, is_active FROM $rec".to_string(),
                vec![("rec", BindValue::Thing(rec.clone()))],
            )
            .await?;
        let fields: Vec<OrderFields> = response.take(0).map_err(TxError::db)?;
        Ok(fields.into_iter().next())
    }

    /// Delete a record and close the gap it leaves in its partition.
    pub async fn compact_delete(&self, id_key: &str) -> Result<(), OrderingError> {
        let rec = Self::record(id_key);
        if self.order_fields(&rec).await?.is_none() {
            return Err(OrderingError::NotFound(format!("{} {id_key} not found", E::TABLE)));
        }

        let tx = Tx::new()
            .stmt("LET $victim = (SELECT * FROM $rec)[0]")
            .stmt("IF $victim == NONE { THROW \"conflict: record vanished\" }")
            .stmt("DELETE $rec")
            .stmt(format!(
                "IF $victim.sort_order != {UNORDERED} {{ \
                 UPDATE {table} SET sort_order -= 1 \
                 WHERE {clause} AND sort_order > $victim.sort_order }}",
                table = E::TABLE,
                clause = self.partition.clause,
            ))
            .bind("rec", rec);
        self.partition_tx(tx).run(self.db).await.map_err(OrderingError::Tx)
    }

    /// Move a record to `target` within its partition, shifting exactly the
    /// records between the old and new position.
    ///
    /// `target` must be in `[0, n - 1]`: out of range is an input error, not
    /// a clamp. The same bounds are re-checked inside the transaction, where
    /// a violation means a concurrent mutation won and the script aborts.
    pub async fn reorder(&self, id_key: &str, target: i64) -> Result<(), OrderingError> {
        let rec = Self::record(id_key);
        let fields = self
            .order_fields(&rec)
            .await?
            .ok_or_else(|| OrderingError::NotFound(format!("{} {id_key} not found", E::TABLE)))?;
        if fields.sort_order == UNORDERED {
            return Err(OrderingError::InvalidTarget(
                "record is not in the ordered partition".to_string(),
            ));
        }
        let len = self.len().await?;
        if target < 0 || target >= len {
            return Err(OrderingError::InvalidTarget(format!(
                "target position {target} is outside 0..{len}"
            )));
        }

        let tx = Tx::new()
            .stmt("LET $moved = (SELECT * FROM $rec)[0]")
            .stmt("IF $moved == NONE { THROW \"conflict: record vanished\" }")
            .stmt(format!(
                "IF $moved.sort_order == {UNORDERED} {{ THROW \"conflict: record left the ordered partition\" }}"
            ))
            .stmt(format!(
                "LET $n = (SELECT count() FROM {table} WHERE {clause} GROUP ALL)[0].count ?? 0",
                table = E::TABLE,
                clause = self.partition.clause,
            ))
            .stmt("IF $target < 0 OR $target > $n - 1 { THROW \"conflict: target position out of range\" }")
            .stmt(format!(
                "IF $target < $moved.sort_order {{ \
                 UPDATE {table} SET sort_order += 1 \
                 WHERE {clause} AND sort_order >= $target AND sort_order < $moved.sort_order AND id != $rec }} \
                 ELSE IF $target > $moved.sort_order {{ \
                 UPDATE {table} SET sort_order -= 1 \
                 WHERE {clause} AND sort_order > $moved.sort_order AND sort_order <= $target AND id != $rec }}",
                table = E::TABLE,
                clause = self.partition.clause,
            ))
            .stmt("UPDATE $rec SET sort_order = $target")
            .bind("rec", rec)
            .bind("target", target);
        self.partition_tx(tx).run(self.db).await.map_err(OrderingError::Tx)
    }

    /// Flip a record between the ordered partition and the parked side.
    ///
    /// Deactivating compacts the partition and parks the record at the
    /// sentinel position; activating appends at the end (the previous
    /// position is deliberately not restored). Returns the new active state.
    pub async fn toggle_active(&self, id_key: &str, now: i64) -> Result<bool, OrderingError> {
        let rec = Self::record(id_key);
        let fields = self
            .order_fields(&rec)
            .await?
            .ok_or_else(|| OrderingError::NotFound(format!("{} {id_key} not found", E::TABLE)))?;

        if fields.is_active.unwrap_or(true) {
            self.deactivate(&rec, now).await?;
            Ok(false)
        } else {
            self.activate(&rec, now).await?;
            Ok(true)
        }
    }

    async fn deactivate(&self, rec: &Thing, now: i64) -> Result<(), TxError> {
        let tx = Tx::new()
            .stmt("LET $parked = (SELECT * FROM $rec)[0]")
            .stmt("IF $parked == NONE { THROW \"conflict: record vanished\" }")
            .stmt("IF $parked.is_active == false { THROW \"conflict: record already inactive\" }")
            .stmt(format!(
                "UPDATE $rec SET is_active = false, sort_order = {UNORDERED}, updated_at = $now"
            ))
            .stmt(format!(
                "UPDATE {table} SET sort_order -= 1 \
                 WHERE {clause} AND sort_order > $parked.sort_order",
                table = E::TABLE,
                clause = self.partition.clause,
            ))
            .bind("rec", rec.clone())
            .bind("now", now);
        self.partition_tx(tx).run(self.db).await
    }

    async fn activate(&self, rec: &Thing, now: i64) -> Result<(), TxError> {
        let tx = Tx::new()
            .stmt("LET $woken = (SELECT * FROM $rec)[0]")
            .stmt("IF $woken == NONE { THROW \"conflict: record vanished\" }")
            .stmt("IF $woken.is_active == true { THROW \"conflict: record already active\" }")
            .stmt(format!(
                "LET $n = (SELECT count() FROM {table} WHERE {clause} GROUP ALL)[0].count ?? 0",
                table = E::TABLE,
                clause = self.partition.clause,
            ))
            .stmt("UPDATE $rec SET is_active = true, sort_order = $n, updated_at = $now")
            .bind("rec", rec.clone())
            .bind("now", now);
        self.partition_tx(tx).run(self.db).await
    }
}
