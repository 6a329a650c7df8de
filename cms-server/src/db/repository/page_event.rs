//! Page Event Repository

use serde::{Deserialize, Serialize};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{PageEvent, PageEventCreate, PageEventUpdate};
use crate::ordering::{OrderedCollection, Partition, UNORDERED};
use crate::utils::now_millis;

const TABLE: &str = "page_event";

/// Query filters for the public past-events archive.
#[derive(Debug, Default, Deserialize)]
pub struct PastEventQuery {
    #[serde(default)]
    pub search: String,
    /// Comma-separated category names
    #[serde(default)]
    pub categories: String,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub pages: i64,
}

#[derive(Debug, Serialize)]
pub struct PastEventsPage {
    pub events: Vec<PageEvent>,
    pub pagination: Pagination,
}

#[derive(Clone)]
pub struct PageEventRepository {
    base: BaseRepository,
}

impl PageEventRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { base: BaseRepository::new(db) }
    }

    fn ordered(&self) -> OrderedCollection<'_, PageEvent> {
        OrderedCollection::new(self.base.db(), Partition::active())
    }

    /// The nearest upcoming active event, if any.
    pub async fn find_featured(&self, today: i64) -> RepoResult<Option<PageEvent>> {
        let events: Vec<PageEvent> = self
            .base
            .db()
            .query("SELECT * FROM page_event WHERE is_active = true AND event_date >= $today ORDER BY event_date ASC LIMIT 1")
            .bind(("today", today))
            .await?
            .take(0)?;
        Ok(events.into_iter().next())
    }

    /// Past active events, newest first, with search/category filters and
    /// pagination.
    pub async fn find_past(&self, today: i64, query: &PastEventQuery) -> RepoResult<PastEventsPage> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(12).clamp(1, 100);
        let start = (page - 1) * limit;

        let mut conditions =
            String::from("is_active = true AND event_date < $today");
        if !query.search.is_empty() {
            conditions.push_str(
                " AND (string::lowercase(title.text) CONTAINS $search \
                 OR string::lowercase(description.text) CONTAINS $search \
                 OR string::lowercase(location.venue) CONTAINS $search \
                 OR string::lowercase(location.address) CONTAINS $search)",
            );
        }
        let categories: Vec<String> = query
            .categories
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();
        if !categories.is_empty() {
            conditions.push_str(" AND category IN $categories");
        }

        let search = query.search.to_lowercase();

        let mut response = self
            .base
            .db()
            .query(format!(
                "SELECT * FROM page_event WHERE {conditions} \
                 ORDER BY event_date DESC LIMIT $limit START $start"
            ))
            .query(format!(
                "SELECT count() FROM page_event WHERE {conditions} GROUP ALL"
            ))
            .bind(("today", today))
            .bind(("search", search))
            .bind(("categories", categories))
            .bind(("limit", limit as i64))
            .bind(("start", start as i64))
            .await?;

        let events: Vec<PageEvent> = response.take(0)?;
        let total: Option<i64> = response.take((1, "count"))?;
        let total = total.unwrap_or(0);

        Ok(PastEventsPage {
            events,
            pagination: Pagination {
                page,
                limit,
                total,
                pages: (total + limit as i64 - 1) / limit as i64,
            },
        })
    }

    /// Distinct category names among active events.
    pub async fn find_categories(&self) -> RepoResult<Vec<String>> {
        let mut categories: Vec<String> = self
            .base
            .db()
            .query("SELECT VALUE category FROM page_event WHERE is_active = true AND category != ''")
            .await?
            .take(0)?;
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    pub async fn find_active(&self) -> RepoResult<Vec<PageEvent>> {
        Ok(self.ordered().list_ordered().await?)
    }

    pub async fn find_admin(&self) -> RepoResult<Vec<PageEvent>> {
        Ok(self.ordered().list_admin().await?)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<PageEvent>> {
        self.base.get(TABLE, id).await
    }

    pub async fn create(&self, data: PageEventCreate) -> RepoResult<PageEvent> {
        let active = data.is_active.unwrap_or(true);
        let sort_order = if active { self.ordered().next_order().await? } else { UNORDERED };
        self.base
            .create(TABLE, data.into_event(sort_order, now_millis()))
            .await
    }

    pub async fn update(&self, id: &str, data: PageEventUpdate) -> RepoResult<PageEvent> {
        if self.find_by_id(id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Page event {id} not found")));
        }
        self.base.merge(TABLE, id, &data, now_millis()).await
    }

    pub async fn toggle_active(&self, id: &str) -> RepoResult<Vec<PageEvent>> {
        self.ordered()
            .toggle_active(strip_table_prefix(TABLE, id), now_millis())
            .await?;
        self.find_admin().await
    }

    pub async fn reorder(&self, id: &str, target: i64) -> RepoResult<Vec<PageEvent>> {
        self.ordered()
            .reorder(strip_table_prefix(TABLE, id), target)
            .await?;
        self.find_admin().await
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        Ok(self.ordered().compact_delete(strip_table_prefix(TABLE, id)).await?)
    }
}
