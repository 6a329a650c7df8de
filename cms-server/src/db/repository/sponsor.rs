//! Sponsor Repository
//!
//! Sponsors and partners share one ordering; the public listing splits the
//! active partition by kind after the ordered read.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{Sponsor, SponsorCreate, SponsorKind, SponsorUpdate, SponsorsView};
use crate::ordering::{OrderedCollection, Partition, UNORDERED};
use crate::utils::now_millis;

const TABLE: &str = "sponsor";

#[derive(Clone)]
pub struct SponsorRepository {
    base: BaseRepository,
}

impl SponsorRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { base: BaseRepository::new(db) }
    }

    fn ordered(&self) -> OrderedCollection<'_, Sponsor> {
        OrderedCollection::new(self.base.db(), Partition::active())
    }

    /// Active records split into sponsors and partners, each in order.
    pub async fn find_active_split(&self) -> RepoResult<SponsorsView> {
        let (sponsors, partners) = self
            .ordered()
            .list_ordered()
            .await?
            .into_iter()
            .partition(|s| matches!(s.kind, SponsorKind::Sponsor));
        Ok(SponsorsView { sponsors, partners })
    }

    pub async fn find_admin(&self) -> RepoResult<Vec<Sponsor>> {
        Ok(self.ordered().list_admin().await?)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Sponsor>> {
        self.base.get(TABLE, id).await
    }

    pub async fn create(&self, data: SponsorCreate) -> RepoResult<Sponsor> {
        let active = data.is_active.unwrap_or(true);
        let sort_order = if active { self.ordered().next_order().await? } else { UNORDERED };
        self.base
            .create(TABLE, data.into_sponsor(sort_order, now_millis()))
            .await
    }

    pub async fn update(&self, id: &str, data: SponsorUpdate) -> RepoResult<Sponsor> {
        if self.find_by_id(id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Sponsor {id} not found")));
        }
        self.base.merge(TABLE, id, &data, now_millis()).await
    }

    pub async fn toggle_active(&self, id: &str) -> RepoResult<Vec<Sponsor>> {
        self.ordered()
            .toggle_active(strip_table_prefix(TABLE, id), now_millis())
            .await?;
        self.find_admin().await
    }

    pub async fn reorder(&self, id: &str, target: i64) -> RepoResult<Vec<Sponsor>> {
        self.ordered()
            .reorder(strip_table_prefix(TABLE, id), target)
            .await?;
        self.find_admin().await
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        Ok(self.ordered().compact_delete(strip_table_prefix(TABLE, id)).await?)
    }
}
