//! Award API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::OrderPayload;
use crate::core::ServerState;
use crate::db::models::{Award, AwardCreate, AwardType, AwardUpdate};
use crate::db::repository::AwardRepository;
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

/// GET /api/awards - 可见奖项：年份倒序，同年按管理顺序 (公开)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Award>>> {
    let repo = AwardRepository::new(state.db.clone());
    Ok(Json(repo.find_visible().await?))
}

/// GET /api/awards/admin - 管理列表
pub async fn list_admin(State(state): State<ServerState>) -> AppResult<Json<Vec<Award>>> {
    let repo = AwardRepository::new(state.db.clone());
    Ok(Json(repo.find_admin().await?))
}

/// GET /api/awards/type/:type - 按类型筛选 (公开)
pub async fn list_by_type(
    State(state): State<ServerState>,
    Path(award_type): Path<String>,
) -> AppResult<Json<Vec<Award>>> {
    let award_type = AwardType::parse(&award_type)
        .ok_or_else(|| AppError::validation(format!("Invalid award type '{award_type}'")))?;
    let repo = AwardRepository::new(state.db.clone());
    Ok(Json(repo.find_by_type(award_type).await?))
}

/// GET /api/awards/year/:year - 按年份筛选 (公开)
pub async fn list_by_year(
    State(state): State<ServerState>,
    Path(year): Path<String>,
) -> AppResult<Json<Vec<Award>>> {
    let repo = AwardRepository::new(state.db.clone());
    Ok(Json(repo.find_by_year(year).await?))
}

/// GET /api/awards/:id - 获取单个奖项 (公开)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Award>> {
    let repo = AwardRepository::new(state.db.clone());
    let award = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Award {id} not found")))?;
    Ok(Json(award))
}

/// POST /api/awards - 创建奖项
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<AwardCreate>,
) -> AppResult<Json<Award>> {
    payload.validate()?;
    let repo = AwardRepository::new(state.db.clone());
    Ok(Json(repo.create(payload).await?))
}

/// PUT /api/awards/:id - 更新字段
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AwardUpdate>,
) -> AppResult<Json<Award>> {
    payload.validate()?;
    let repo = AwardRepository::new(state.db.clone());
    Ok(Json(repo.update(&id, payload).await?))
}

/// PATCH /api/awards/:id/toggle-active - 切换可见状态
pub async fn toggle_active(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Award>>> {
    let repo = AwardRepository::new(state.db.clone());
    Ok(Json(repo.toggle_active(&id).await?))
}

/// PATCH /api/awards/:id/order - 移动到目标位置
pub async fn reorder(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderPayload>,
) -> AppResult<Json<Vec<Award>>> {
    let repo = AwardRepository::new(state.db.clone());
    Ok(Json(repo.reorder(&id, payload.order).await?))
}

/// DELETE /api/awards/:id - 删除并压缩顺序
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = AwardRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(ok_with_message(true, "Award deleted successfully"))
}
