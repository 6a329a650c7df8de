//! Page Event API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{TimeZone, Utc};

use crate::api::OrderPayload;
use crate::core::ServerState;
use crate::db::models::{PageEvent, PageEventCreate, PageEventUpdate};
use crate::db::repository::PageEventRepository;
use crate::db::repository::page_event::{PastEventQuery, PastEventsPage};
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

/// Start of the current UTC day in epoch milliseconds.
fn start_of_today() -> i64 {
    let now = Utc::now();
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|dt| Utc.from_utc_datetime(&dt).timestamp_millis())
        .unwrap_or_else(|| now.timestamp_millis())
}

/// GET /api/page-events - 获取启用的活动 (公开)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<PageEvent>>> {
    let repo = PageEventRepository::new(state.db.clone());
    Ok(Json(repo.find_active().await?))
}

/// GET /api/page-events/featured - 最近一场即将到来的活动 (公开)
pub async fn featured(State(state): State<ServerState>) -> AppResult<Json<Option<PageEvent>>> {
    let repo = PageEventRepository::new(state.db.clone());
    Ok(Json(repo.find_featured(start_of_today()).await?))
}

/// GET /api/page-events/past - 过往活动，支持搜索/分类/分页 (公开)
pub async fn past(
    State(state): State<ServerState>,
    Query(query): Query<PastEventQuery>,
) -> AppResult<Json<PastEventsPage>> {
    let repo = PageEventRepository::new(state.db.clone());
    Ok(Json(repo.find_past(start_of_today(), &query).await?))
}

/// GET /api/page-events/categories - 启用活动的分类列表 (公开)
pub async fn categories(State(state): State<ServerState>) -> AppResult<Json<Vec<String>>> {
    let repo = PageEventRepository::new(state.db.clone());
    Ok(Json(repo.find_categories().await?))
}

/// GET /api/page-events/admin - 管理列表
pub async fn list_admin(State(state): State<ServerState>) -> AppResult<Json<Vec<PageEvent>>> {
    let repo = PageEventRepository::new(state.db.clone());
    Ok(Json(repo.find_admin().await?))
}

/// GET /api/page-events/:id - 获取单个活动 (公开)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<PageEvent>> {
    let repo = PageEventRepository::new(state.db.clone());
    let event = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Page event {id} not found")))?;
    Ok(Json(event))
}

/// POST /api/page-events - 创建活动
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PageEventCreate>,
) -> AppResult<Json<PageEvent>> {
    payload.validate()?;
    let repo = PageEventRepository::new(state.db.clone());
    Ok(Json(repo.create(payload).await?))
}

/// PUT /api/page-events/:id - 更新活动字段
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<PageEventUpdate>,
) -> AppResult<Json<PageEvent>> {
    payload.validate()?;
    let repo = PageEventRepository::new(state.db.clone());
    Ok(Json(repo.update(&id, payload).await?))
}

/// PATCH /api/page-events/:id/toggle-active - 切换启用状态
pub async fn toggle_active(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<PageEvent>>> {
    let repo = PageEventRepository::new(state.db.clone());
    Ok(Json(repo.toggle_active(&id).await?))
}

/// PATCH /api/page-events/:id/order - 移动到目标位置
pub async fn reorder(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderPayload>,
) -> AppResult<Json<Vec<PageEvent>>> {
    let repo = PageEventRepository::new(state.db.clone());
    Ok(Json(repo.reorder(&id, payload.order).await?))
}

/// DELETE /api/page-events/:id - 删除活动并压缩顺序
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = PageEventRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(ok_with_message(true, "Page event deleted successfully"))
}
