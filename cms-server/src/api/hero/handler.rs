//! Hero API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::OrderPayload;
use crate::core::ServerState;
use crate::db::models::{HeroContent, HeroContentCreate, HeroContentUpdate};
use crate::db::repository::HeroRepository;
use crate::utils::{AppResponse, AppResult, ok_with_message};

/// GET /api/hero - 获取全部轮播内容 (公开)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<HeroContent>>> {
    let repo = HeroRepository::new(state.db.clone());
    Ok(Json(repo.find_all().await?))
}

/// POST /api/hero - 创建轮播内容 (追加到末尾)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<HeroContentCreate>,
) -> AppResult<Json<HeroContent>> {
    payload.validate()?;
    let repo = HeroRepository::new(state.db.clone());
    Ok(Json(repo.create(payload).await?))
}

/// PUT /api/hero/:id - 更新轮播内容
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<HeroContentUpdate>,
) -> AppResult<Json<HeroContent>> {
    payload.validate()?;
    let repo = HeroRepository::new(state.db.clone());
    Ok(Json(repo.update(&id, payload).await?))
}

/// PATCH /api/hero/:id/order - 移动到目标位置
pub async fn reorder(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderPayload>,
) -> AppResult<Json<Vec<HeroContent>>> {
    let repo = HeroRepository::new(state.db.clone());
    Ok(Json(repo.reorder(&id, payload.order).await?))
}

/// DELETE /api/hero/:id - 删除轮播内容并压缩顺序
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = HeroRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(ok_with_message(true, "Hero content deleted successfully"))
}
