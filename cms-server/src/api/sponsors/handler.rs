//! Sponsor API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::OrderPayload;
use crate::core::ServerState;
use crate::db::models::{Sponsor, SponsorCreate, SponsorUpdate, SponsorsView};
use crate::db::repository::SponsorRepository;
use crate::utils::{AppResponse, AppResult, ok_with_message};

/// GET /api/sponsors - 启用的赞助商与合作伙伴，按类别拆分 (公开)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<SponsorsView>> {
    let repo = SponsorRepository::new(state.db.clone());
    Ok(Json(repo.find_active_split().await?))
}

/// GET /api/sponsors/admin - 管理列表
pub async fn list_admin(State(state): State<ServerState>) -> AppResult<Json<Vec<Sponsor>>> {
    let repo = SponsorRepository::new(state.db.clone());
    Ok(Json(repo.find_admin().await?))
}

/// POST /api/sponsors - 创建赞助商/合作伙伴
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SponsorCreate>,
) -> AppResult<Json<Sponsor>> {
    payload.validate()?;
    let repo = SponsorRepository::new(state.db.clone());
    Ok(Json(repo.create(payload).await?))
}

/// PUT /api/sponsors/:id - 更新字段
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<SponsorUpdate>,
) -> AppResult<Json<Sponsor>> {
    payload.validate()?;
    let repo = SponsorRepository::new(state.db.clone());
    Ok(Json(repo.update(&id, payload).await?))
}

/// PATCH /api/sponsors/:id/toggle-active - 切换启用状态
pub async fn toggle_active(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Sponsor>>> {
    let repo = SponsorRepository::new(state.db.clone());
    Ok(Json(repo.toggle_active(&id).await?))
}

/// PATCH /api/sponsors/:id/order - 移动到目标位置
pub async fn reorder(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderPayload>,
) -> AppResult<Json<Vec<Sponsor>>> {
    let repo = SponsorRepository::new(state.db.clone());
    Ok(Json(repo.reorder(&id, payload.order).await?))
}

/// DELETE /api/sponsors/:id - 删除并压缩顺序
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = SponsorRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(ok_with_message(true, "Sponsor deleted successfully"))
}
