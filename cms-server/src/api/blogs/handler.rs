//! Blog API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::HeaderMap,
};

use crate::core::ServerState;
use crate::db::models::{Blog, BlogCreate, BlogUpdate};
use crate::db::repository::BlogRepository;
use crate::db::repository::blog::{BlogPage, BlogQuery};
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

/// Client key for view debouncing; proxies put the caller in
/// `X-Forwarded-For`.
fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .or_else(|| headers.get("x-real-ip"))
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(',').next().unwrap_or(v).trim().to_string())
        .unwrap_or_else(|| "local".to_string())
}

/// GET /api/blogs - 已发布文章，支持分类/精选/搜索/分页 (公开)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<BlogQuery>,
) -> AppResult<Json<BlogPage>> {
    let repo = BlogRepository::new(state.db.clone());
    Ok(Json(repo.find_published(&query).await?))
}

/// GET /api/blogs/slug/:slug - 按 slug 获取文章，浏览计数防抖 (公开)
pub async fn get_by_slug(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> AppResult<Json<Blog>> {
    let repo = BlogRepository::new(state.db.clone());
    let mut blog = repo
        .find_published_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Blog post '{slug}' not found")))?;

    // count each client at most once per window
    if let Some(id) = blog.id.as_ref().map(|t| t.to_string())
        && state.views.should_count(&id, &client_key(&headers))
    {
        repo.increment_views(&id).await?;
        blog.views += 1;
    }

    Ok(Json(blog))
}

/// GET /api/blogs/popular - 浏览量最高的已发布文章 (公开)
pub async fn popular(State(state): State<ServerState>) -> AppResult<Json<Vec<Blog>>> {
    let repo = BlogRepository::new(state.db.clone());
    Ok(Json(repo.find_popular(5).await?))
}

/// GET /api/blogs/admin - 全部文章按最近更新
pub async fn list_admin(State(state): State<ServerState>) -> AppResult<Json<Vec<Blog>>> {
    let repo = BlogRepository::new(state.db.clone());
    Ok(Json(repo.find_admin().await?))
}

/// POST /api/blogs - 创建文章
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BlogCreate>,
) -> AppResult<Json<Blog>> {
    payload.validate()?;
    let repo = BlogRepository::new(state.db.clone());
    Ok(Json(repo.create(payload).await?))
}

/// PUT /api/blogs/:id - 更新文章
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<BlogUpdate>,
) -> AppResult<Json<Blog>> {
    payload.validate()?;
    let repo = BlogRepository::new(state.db.clone());
    Ok(Json(repo.update(&id, payload).await?))
}

/// DELETE /api/blogs/:id - 删除文章
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = BlogRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(ok_with_message(true, "Blog post deleted successfully"))
}
