//! Event API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::OrderPayload;
use crate::core::ServerState;
use crate::db::models::{Event, EventCreate, EventUpdate};
use crate::db::repository::EventRepository;
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

/// GET /api/events - 获取所有启用的活动 (公开)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Event>>> {
    let repo = EventRepository::new(state.db.clone());
    Ok(Json(repo.find_active().await?))
}

/// GET /api/events/admin - 获取全部活动：启用按顺序，停用按最近更新
pub async fn list_admin(State(state): State<ServerState>) -> AppResult<Json<Vec<Event>>> {
    let repo = EventRepository::new(state.db.clone());
    Ok(Json(repo.find_admin().await?))
}

/// GET /api/events/:id - 获取单个活动 (公开)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Event>> {
    let repo = EventRepository::new(state.db.clone());
    let event = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Event {id} not found")))?;
    Ok(Json(event))
}

/// POST /api/events - 创建活动 (追加到启用序列末尾)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EventCreate>,
) -> AppResult<Json<Event>> {
    payload.validate()?;
    let repo = EventRepository::new(state.db.clone());
    Ok(Json(repo.create(payload).await?))
}

/// PUT /api/events/:id - 更新活动字段 (不含顺序与启用状态)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<EventUpdate>,
) -> AppResult<Json<Event>> {
    payload.validate()?;
    let repo = EventRepository::new(state.db.clone());
    Ok(Json(repo.update(&id, payload).await?))
}

/// PATCH /api/events/:id/toggle-active - 切换启用状态
pub async fn toggle_active(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Event>>> {
    let repo = EventRepository::new(state.db.clone());
    Ok(Json(repo.toggle_active(&id).await?))
}

/// PATCH /api/events/:id/order - 移动到目标位置
pub async fn reorder(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderPayload>,
) -> AppResult<Json<Vec<Event>>> {
    let repo = EventRepository::new(state.db.clone());
    Ok(Json(repo.reorder(&id, payload.order).await?))
}

/// DELETE /api/events/:id - 删除活动并压缩顺序
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = EventRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(ok_with_message(true, "Event deleted successfully"))
}
