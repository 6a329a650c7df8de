//! Event Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{Event, EventCreate, EventUpdate};
use crate::ordering::{OrderedCollection, Partition, UNORDERED};
use crate::utils::now_millis;

const TABLE: &str = "event";

#[derive(Clone)]
pub struct EventRepository {
    base: BaseRepository,
}

impl EventRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { base: BaseRepository::new(db) }
    }

    fn ordered(&self) -> OrderedCollection<'_, Event> {
        OrderedCollection::new(self.base.db(), Partition::active())
    }

    /// Active events ascending by sort_order (public listing)
    pub async fn find_active(&self) -> RepoResult<Vec<Event>> {
        Ok(self.ordered().list_ordered().await?)
    }

    /// Active events in order, then inactive events by recency (admin listing)
    pub async fn find_admin(&self) -> RepoResult<Vec<Event>> {
        Ok(self.ordered().list_admin().await?)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Event>> {
        self.base.get(TABLE, id).await
    }

    /// Create an event appended at the end of the active partition, or
    /// parked immediately when created inactive.
    pub async fn create(&self, data: EventCreate) -> RepoResult<Event> {
        let active = data.is_active.unwrap_or(true);
        let sort_order = if active { self.ordered().next_order().await? } else { UNORDERED };
        self.base.create(TABLE, data.into_event(sort_order, now_millis())).await
    }

    /// Field update; ordering state is not reachable from here.
    pub async fn update(&self, id: &str, data: EventUpdate) -> RepoResult<Event> {
        if self.find_by_id(id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Event {id} not found")));
        }
        self.base.merge(TABLE, id, &data, now_millis()).await
    }

    /// Flip active state; returns the fresh admin listing.
    pub async fn toggle_active(&self, id: &str) -> RepoResult<Vec<Event>> {
        self.ordered()
            .toggle_active(strip_table_prefix(TABLE, id), now_millis())
            .await?;
        self.find_admin().await
    }

    /// Move within the active partition; returns the fresh admin listing.
    pub async fn reorder(&self, id: &str, target: i64) -> RepoResult<Vec<Event>> {
        self.ordered()
            .reorder(strip_table_prefix(TABLE, id), target)
            .await?;
        self.find_admin().await
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        Ok(self.ordered().compact_delete(strip_table_prefix(TABLE, id)).await?)
    }
}
