//! Home Event Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{HomeEvent, HomeEventCreate, HomeEventUpdate};
use crate::ordering::{OrderedCollection, Partition, UNORDERED};
use crate::utils::now_millis;

const TABLE: &str = "home_event";

#[derive(Clone)]
pub struct HomeEventRepository {
    base: BaseRepository,
}

impl HomeEventRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { base: BaseRepository::new(db) }
    }

    fn ordered(&self) -> OrderedCollection<'_, HomeEvent> {
        OrderedCollection::new(self.base.db(), Partition::active())
    }

    pub async fn find_active(&self) -> RepoResult<Vec<HomeEvent>> {
        Ok(self.ordered().list_ordered().await?)
    }

    pub async fn find_admin(&self) -> RepoResult<Vec<HomeEvent>> {
        Ok(self.ordered().list_admin().await?)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<HomeEvent>> {
        self.base.get(TABLE, id).await
    }

    pub async fn create(&self, data: HomeEventCreate) -> RepoResult<HomeEvent> {
        let active = data.is_active.unwrap_or(true);
        let sort_order = if active { self.ordered().next_order().await? } else { UNORDERED };
        self.base
            .create(TABLE, HomeEvent(data.into_event(sort_order, now_millis())))
            .await
    }

    pub async fn update(&self, id: &str, data: HomeEventUpdate) -> RepoResult<HomeEvent> {
        if self.find_by_id(id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Home event {id} not found")));
        }
        self.base.merge(TABLE, id, &data, now_millis()).await
    }

    pub async fn toggle_active(&self, id: &str) -> RepoResult<Vec<HomeEvent>> {
        self.ordered()
            .toggle_active(strip_table_prefix(TABLE, id), now_millis())
            .await?;
        self.find_admin().await
    }

    pub async fn reorder(&self, id: &str, target: i64) -> RepoResult<Vec<HomeEvent>> {
        self.ordered()
            .reorder(strip_table_prefix(TABLE, id), target)
            .await?;
        self.find_admin().await
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        Ok(self.ordered().compact_delete(strip_table_prefix(TABLE, id)).await?)
    }
}
