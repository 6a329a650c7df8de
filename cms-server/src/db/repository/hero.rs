//! Hero Content Repository
//!
//! The hero rotation has no inactive side: the whole table is one ordered
//! partition.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{HeroContent, HeroContentCreate, HeroContentUpdate};
use crate::ordering::{OrderedCollection, Partition};
use crate::utils::now_millis;

const TABLE: &str = "hero_content";

#[derive(Clone)]
pub struct HeroRepository {
    base: BaseRepository,
}

impl HeroRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { base: BaseRepository::new(db) }
    }

    fn ordered(&self) -> OrderedCollection<'_, HeroContent> {
        OrderedCollection::new(self.base.db(), Partition::all())
    }

    pub async fn find_all(&self) -> RepoResult<Vec<HeroContent>> {
        Ok(self.ordered().list_ordered().await?)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<HeroContent>> {
        self.base.get(TABLE, id).await
    }

    pub async fn create(&self, data: HeroContentCreate) -> RepoResult<HeroContent> {
        let sort_order = self.ordered().next_order().await?;
        self.base
            .create(TABLE, data.into_content(sort_order, now_millis()))
            .await
    }

    pub async fn update(&self, id: &str, data: HeroContentUpdate) -> RepoResult<HeroContent> {
        if self.find_by_id(id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Hero content {id} not found")));
        }
        self.base.merge(TABLE, id, &data, now_millis()).await
    }

    /// Move a slot within the rotation; returns the fresh rotation.
    pub async fn reorder(&self, id: &str, target: i64) -> RepoResult<Vec<HeroContent>> {
        self.ordered()
            .reorder(strip_table_prefix(TABLE, id), target)
            .await?;
        self.find_all().await
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        Ok(self.ordered().compact_delete(strip_table_prefix(TABLE, id)).await?)
    }
}
