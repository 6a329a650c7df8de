//! Timeline API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::OrderPayload;
use crate::core::ServerState;
use crate::db::models::{
    TimelinePhase, TimelinePhaseCreate, TimelinePhaseUpdate, TimelineSection,
    TimelineSectionCreate, TimelineSectionUpdate, TimelineView,
};
use crate::db::repository::TimelineRepository;
use crate::utils::{AppResponse, AppResult, ok_with_message};

fn repo(state: &ServerState) -> TimelineRepository {
    TimelineRepository::new(state.db.clone())
}

/// GET /api/timeline - 时间线全量视图：启用的分区与节点 (公开)
pub async fn view(State(state): State<ServerState>) -> AppResult<Json<TimelineView>> {
    Ok(Json(repo(&state).find_view().await?))
}

/// GET /api/timeline/sections - 启用的分区 (公开)
pub async fn list_sections(State(state): State<ServerState>) -> AppResult<Json<Vec<TimelineSection>>> {
    Ok(Json(repo(&state).find_active_sections().await?))
}

/// GET /api/timeline/admin/sections - 全部分区按顺序
pub async fn list_sections_admin(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<TimelineSection>>> {
    Ok(Json(repo(&state).find_all_sections().await?))
}

/// GET /api/timeline/sections/:id/phases - 分区内启用的节点 (公开)
pub async fn section_phases(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<TimelinePhase>>> {
    Ok(Json(repo(&state).find_section_phases(&id, false).await?))
}

/// GET /api/timeline/admin/sections/:id/phases - 分区内全部节点
pub async fn section_phases_admin(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<TimelinePhase>>> {
    Ok(Json(repo(&state).find_section_phases(&id, true).await?))
}

/// POST /api/timeline/sections - 创建分区 (追加到末尾)
pub async fn create_section(
    State(state): State<ServerState>,
    Json(payload): Json<TimelineSectionCreate>,
) -> AppResult<Json<TimelineSection>> {
    payload.validate()?;
    Ok(Json(repo(&state).create_section(payload).await?))
}

/// PUT /api/timeline/sections/:id - 更新分区字段
pub async fn update_section(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TimelineSectionUpdate>,
) -> AppResult<Json<TimelineSection>> {
    payload.validate()?;
    Ok(Json(repo(&state).update_section(&id, payload).await?))
}

/// DELETE /api/timeline/sections/:id - 删除分区及其节点，压缩顺序
pub async fn delete_section(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    repo(&state).delete_section(&id).await?;
    Ok(ok_with_message(true, "Timeline section deleted successfully"))
}

/// PATCH /api/timeline/sections/:id/order - 移动分区位置
pub async fn reorder_section(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderPayload>,
) -> AppResult<Json<Vec<TimelineSection>>> {
    Ok(Json(repo(&state).reorder_section(&id, payload.order).await?))
}

/// POST /api/timeline/phases - 创建节点 (追加到分区末尾)
pub async fn create_phase(
    State(state): State<ServerState>,
    Json(payload): Json<TimelinePhaseCreate>,
) -> AppResult<Json<TimelinePhase>> {
    payload.validate()?;
    Ok(Json(repo(&state).create_phase(payload).await?))
}

/// PUT /api/timeline/phases/:id - 更新节点字段
pub async fn update_phase(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TimelinePhaseUpdate>,
) -> AppResult<Json<TimelinePhase>> {
    payload.validate()?;
    Ok(Json(repo(&state).update_phase(&id, payload).await?))
}

/// PATCH /api/timeline/phases/:id/toggle-active - 切换节点启用状态
pub async fn toggle_phase(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<TimelinePhase>>> {
    Ok(Json(repo(&state).toggle_phase(&id).await?))
}

/// PATCH /api/timeline/phases/:id/order - 移动节点位置
pub async fn reorder_phase(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderPayload>,
) -> AppResult<Json<Vec<TimelinePhase>>> {
    Ok(Json(repo(&state).reorder_phase(&id, payload.order).await?))
}

/// DELETE /api/timeline/phases/:id - 删除节点并压缩分区顺序
pub async fn delete_phase(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    repo(&state).delete_phase(&id).await?;
    Ok(ok_with_message(true, "Timeline phase deleted successfully"))
}
