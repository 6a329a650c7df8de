//! Home Event API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::OrderPayload;
use crate::core::ServerState;
use crate::db::models::{HomeEvent, HomeEventCreate, HomeEventUpdate};
use crate::db::repository::HomeEventRepository;
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

/// GET /api/home-events - 获取首页启用的活动卡片 (公开)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<HomeEvent>>> {
    let repo = HomeEventRepository::new(state.db.clone());
    Ok(Json(repo.find_active().await?))
}

/// GET /api/home-events/admin - 管理列表
pub async fn list_admin(State(state): State<ServerState>) -> AppResult<Json<Vec<HomeEvent>>> {
    let repo = HomeEventRepository::new(state.db.clone());
    Ok(Json(repo.find_admin().await?))
}

/// GET /api/home-events/:id - 获取单个卡片 (公开)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<HomeEvent>> {
    let repo = HomeEventRepository::new(state.db.clone());
    let event = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Home event {id} not found")))?;
    Ok(Json(event))
}

/// POST /api/home-events - 创建卡片
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<HomeEventCreate>,
) -> AppResult<Json<HomeEvent>> {
    payload.validate()?;
    let repo = HomeEventRepository::new(state.db.clone());
    Ok(Json(repo.create(payload).await?))
}

/// PUT /api/home-events/:id - 更新卡片字段
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<HomeEventUpdate>,
) -> AppResult<Json<HomeEvent>> {
    payload.validate()?;
    let repo = HomeEventRepository::new(state.db.clone());
    Ok(Json(repo.update(&id, payload).await?))
}

/// PATCH /api/home-events/:id/toggle-active - 切换启用状态
pub async fn toggle_active(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<HomeEvent>>> {
    let repo = HomeEventRepository::new(state.db.clone());
    Ok(Json(repo.toggle_active(&id).await?))
}

/// PATCH /api/home-events/:id/order - 移动到目标位置
pub async fn reorder(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderPayload>,
) -> AppResult<Json<Vec<HomeEvent>>> {
    let repo = HomeEventRepository::new(state.db.clone());
    Ok(Json(repo.reorder(&id, payload.order).await?))
}

/// DELETE /api/home-events/:id - 删除卡片并压缩顺序
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = HomeEventRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(ok_with_message(true, "Home event deleted successfully"))
}
