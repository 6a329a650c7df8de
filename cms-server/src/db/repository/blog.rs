//! Blog Repository
//!
//! Posts sort by recency, not by managed order. View counts are bumped with
//! a single-field update so they never touch `updated_at`.

use serde::{Deserialize, Serialize};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::{Blog, BlogCreate, BlogStatus, BlogUpdate};
use crate::utils::now_millis;

const TABLE: &str = "blog";

/// Query filters for the public listing.
#[derive(Debug, Default, Deserialize)]
pub struct BlogQuery {
    #[serde(default)]
    pub category: String,
    pub featured: Option<bool>,
    #[serde(default)]
    pub search: String,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct BlogPage {
    pub blogs: Vec<Blog>,
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub pages: i64,
}

#[derive(Clone)]
pub struct BlogRepository {
    base: BaseRepository,
}

impl BlogRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { base: BaseRepository::new(db) }
    }

    pub async fn find_published(&self, query: &BlogQuery) -> RepoResult<BlogPage> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(9).clamp(1, 100);
        let start = (page - 1) * limit;

        let mut conditions = String::from("status = 'published'");
        if !query.category.is_empty() {
            conditions.push_str(" AND category = $category");
        }
        if query.featured == Some(true) {
            conditions.push_str(" AND featured = true");
        }
        if !query.search.is_empty() {
            conditions.push_str(
                " AND (string::lowercase(title) CONTAINS $search \
                 OR string::lowercase(excerpt) CONTAINS $search \
                 OR string::lowercase(author_name) CONTAINS $search)",
            );
        }

        let mut response = self
            .base
            .db()
            .query(format!(
                "SELECT * FROM blog WHERE {conditions} \
                 ORDER BY published_at DESC LIMIT $limit START $start"
            ))
            .query(format!("SELECT count() FROM blog WHERE {conditions} GROUP ALL"))
            .bind(("category", query.category.clone()))
            .bind(("search", query.search.to_lowercase()))
            .bind(("limit", limit as i64))
            .bind(("start", start as i64))
            .await?;

        let blogs: Vec<Blog> = response.take(0)?;
        let total: Option<i64> = response.take((1, "count"))?;
        let total = total.unwrap_or(0);

        Ok(BlogPage {
            blogs,
            page,
            limit,
            total,
            pages: (total + limit as i64 - 1) / limit as i64,
        })
    }

    pub async fn find_published_by_slug(&self, slug: &str) -> RepoResult<Option<Blog>> {
        let blogs: Vec<Blog> = self
            .base
            .db()
            .query("SELECT * FROM blog WHERE slug = $slug AND status = 'published' LIMIT 1")
            .bind(("slug", slug.to_string()))
            .await?
            .take(0)?;
        Ok(blogs.into_iter().next())
    }

    /// Most-viewed published posts.
    pub async fn find_popular(&self, limit: u32) -> RepoResult<Vec<Blog>> {
        let blogs: Vec<Blog> = self
            .base
            .db()
            .query("SELECT * FROM blog WHERE status = 'published' AND views > 0 ORDER BY views DESC LIMIT $limit")
            .bind(("limit", limit.clamp(1, 50) as i64))
            .await?
            .take(0)?;
        Ok(blogs)
    }

    pub async fn find_admin(&self) -> RepoResult<Vec<Blog>> {
        let blogs: Vec<Blog> = self
            .base
            .db()
            .query("SELECT * FROM blog ORDER BY updated_at DESC")
            .await?
            .take(0)?;
        Ok(blogs)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Blog>> {
        self.base.get(TABLE, id).await
    }

    async fn slug_taken(&self, slug: &str) -> RepoResult<bool> {
        Ok(self.find_by_slug_any_status(slug).await?.is_some())
    }

    async fn find_by_slug_any_status(&self, slug: &str) -> RepoResult<Option<Blog>> {
        let blogs: Vec<Blog> = self
            .base
            .db()
            .query("SELECT * FROM blog WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug.to_string()))
            .await?
            .take(0)?;
        Ok(blogs.into_iter().next())
    }

    pub async fn create(&self, data: BlogCreate) -> RepoResult<Blog> {
        if self.slug_taken(&data.slug).await? {
            return Err(RepoError::Duplicate(format!("Blog post '{}' already exists", data.slug)));
        }
        self.base.create(TABLE, data.into_blog(now_millis())).await
    }

    pub async fn update(&self, id: &str, data: BlogUpdate) -> RepoResult<Blog> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Blog post {id} not found")))?;

        if let Some(slug) = &data.slug
            && *slug != existing.slug
            && self.slug_taken(slug).await?
        {
            return Err(RepoError::Duplicate(format!("Blog post '{slug}' already exists")));
        }

        let now = now_millis();
        let blog: Blog = self.base.merge(TABLE, id, &data, now).await?;

        // first transition to published stamps the publication time
        if matches!(blog.status, BlogStatus::Published) && blog.published_at == 0 {
            self.base
                .db()
                .query("UPDATE $thing SET published_at = $now")
                .bind(("thing", make_thing(TABLE, strip_table_prefix(TABLE, id))))
                .bind(("now", now))
                .await?
                .check()?;
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Blog post {id} not found")));
        }
        Ok(blog)
    }

    /// Bump the view counter without touching `updated_at`.
    pub async fn increment_views(&self, id: &str) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $thing SET views += 1")
            .bind(("thing", make_thing(TABLE, strip_table_prefix(TABLE, id))))
            .await?
            .check()?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let deleted: Option<Blog> = self.base.remove(TABLE, id).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Blog post {id} not found")));
        }
        Ok(())
    }
}
