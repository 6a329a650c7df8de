//! Award Repository
//!
//! The trophy wall is grouped by year on the public site: visible awards
//! sort by year descending first, then by their managed order. The admin
//! dashboard uses the uniform ordered-then-recency listing.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{Award, AwardCreate, AwardType, AwardUpdate};
use crate::ordering::{OrderedCollection, Partition, UNORDERED};
use crate::utils::now_millis;

const TABLE: &str = "award";

#[derive(Clone)]
pub struct AwardRepository {
    base: BaseRepository,
}

impl AwardRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { base: BaseRepository::new(db) }
    }

    fn ordered(&self) -> OrderedCollection<'_, Award> {
        OrderedCollection::new(self.base.db(), Partition::active())
    }

    /// Visible awards, newest year first, managed order within a year.
    pub async fn find_visible(&self) -> RepoResult<Vec<Award>> {
        let awards: Vec<Award> = self
            .base
            .db()
            .query("SELECT * FROM award WHERE is_active = true ORDER BY year DESC, sort_order ASC")
            .await?
            .take(0)?;
        Ok(awards)
    }

    pub async fn find_admin(&self) -> RepoResult<Vec<Award>> {
        Ok(self.ordered().list_admin().await?)
    }

    pub async fn find_by_type(&self, award_type: AwardType) -> RepoResult<Vec<Award>> {
        let awards: Vec<Award> = self
            .base
            .db()
            .query("SELECT * FROM award WHERE is_active = true AND award_type = $award_type ORDER BY year DESC, sort_order ASC")
            .bind(("award_type", award_type))
            .await?
            .take(0)?;
        Ok(awards)
    }

    pub async fn find_by_year(&self, year: String) -> RepoResult<Vec<Award>> {
        let awards: Vec<Award> = self
            .base
            .db()
            .query("SELECT * FROM award WHERE is_active = true AND year = $year ORDER BY sort_order ASC")
            .bind(("year", year))
            .await?
            .take(0)?;
        Ok(awards)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Award>> {
        self.base.get(TABLE, id).await
    }

    pub async fn create(&self, data: AwardCreate) -> RepoResult<Award> {
        let active = data.is_active.unwrap_or(true);
        let sort_order = if active { self.ordered().next_order().await? } else { UNORDERED };
        self.base
            .create(TABLE, data.into_award(sort_order, now_millis()))
            .await
    }

    pub async fn update(&self, id: &str, data: AwardUpdate) -> RepoResult<Award> {
        if self.find_by_id(id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Award {id} not found")));
        }
        self.base.merge(TABLE, id, &data, now_millis()).await
    }

    pub async fn toggle_active(&self, id: &str) -> RepoResult<Vec<Award>> {
        self.ordered()
            .toggle_active(strip_table_prefix(TABLE, id), now_millis())
            .await?;
        self.find_admin().await
    }

    pub async fn reorder(&self, id: &str, target: i64) -> RepoResult<Vec<Award>> {
        self.ordered()
            .reorder(strip_table_prefix(TABLE, id), target)
            .await?;
        self.find_admin().await
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        Ok(self.ordered().compact_delete(strip_table_prefix(TABLE, id)).await?)
    }
}
