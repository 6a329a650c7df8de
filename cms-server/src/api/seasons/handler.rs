//! Season API Handlers
//!
//! Media cleanup is best-effort: record mutations commit first, hosted
//! assets are released afterwards and a host failure only logs.

use axum::{
    Json,
    extract::{Multipart, Path, State},
};

use crate::api::OrderPayload;
use crate::api::upload::handler::read_image_field;
use crate::core::ServerState;
use crate::db::models::{
    BoardMember, BoardMemberCreate, BoardMemberUpdate, Highlight, HighlightCreate,
    HighlightUpdate, MediaRef, Season, SeasonCreate, SeasonUpdate,
};
use crate::db::repository::SeasonRepository;
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

fn repo(state: &ServerState) -> SeasonRepository {
    SeasonRepository::new(state.db.clone())
}

// ==================== Public ====================

/// GET /api/seasons - 获取启用的赛季 (公开)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Season>>> {
    Ok(Json(repo(&state).find_active().await?))
}

/// GET /api/seasons/year/:academic_year - 按学年获取赛季 (公开)
pub async fn get_by_year(
    State(state): State<ServerState>,
    Path(academic_year): Path<String>,
) -> AppResult<Json<Season>> {
    let season = repo(&state)
        .find_by_year(&academic_year)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Season {academic_year} not found")))?;
    Ok(Json(season))
}

/// GET /api/seasons/:id - 获取单个赛季 (公开，仅启用)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Season>> {
    let season = repo(&state)
        .find_by_id(&id)
        .await?
        .filter(|s| s.is_active)
        .ok_or_else(|| AppError::not_found(format!("Season {id} not found")))?;
    Ok(Json(season))
}

// ==================== Season admin ====================

/// GET /api/seasons/admin/all - 全部赛季按顺序
pub async fn list_admin(State(state): State<ServerState>) -> AppResult<Json<Vec<Season>>> {
    Ok(Json(repo(&state).find_all().await?))
}

/// POST /api/seasons/admin - 创建赛季 (追加到末尾)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SeasonCreate>,
) -> AppResult<Json<Season>> {
    payload.validate()?;
    Ok(Json(repo(&state).create(payload).await?))
}

/// PUT /api/seasons/admin/:id - 更新赛季字段
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<SeasonUpdate>,
) -> AppResult<Json<Season>> {
    payload.validate()?;
    Ok(Json(repo(&state).update(&id, payload).await?))
}

/// DELETE /api/seasons/admin/:id - 删除赛季并释放其托管图片
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let season = repo(&state).delete(&id).await?;

    state.media.destroy_quietly(&season.cover_image).await;
    for member in &season.board_members {
        state.media.destroy_quietly(&member.avatar).await;
    }
    for highlight in &season.highlights {
        state.media.destroy_quietly(&highlight.image).await;
    }

    Ok(ok_with_message(true, "Season deleted successfully"))
}

/// PATCH /api/seasons/admin/:id/order - 移动赛季位置
pub async fn reorder(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderPayload>,
) -> AppResult<Json<Vec<Season>>> {
    Ok(Json(repo(&state).reorder(&id, payload.order).await?))
}

/// POST /api/seasons/admin/:id/cover-image - 上传封面
pub async fn upload_cover(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AppResult<Json<Season>> {
    let image = read_image_field(multipart).await?;
    let uploaded = state
        .media
        .upload(image.bytes, &image.file_name, "seasons/covers")
        .await?;

    let (season, old) = repo(&state).set_cover_image(&id, uploaded).await?;
    state.media.destroy_quietly(&old).await;
    Ok(Json(season))
}

/// DELETE /api/seasons/admin/:id/cover-image - 移除封面
pub async fn delete_cover(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let (_, old) = repo(&state).set_cover_image(&id, MediaRef::default()).await?;
    state.media.destroy_quietly(&old).await;
    Ok(ok_with_message(true, "Cover image deleted successfully"))
}

// ==================== Board members ====================

/// POST /api/seasons/admin/:id/board-members - 添加成员 (追加到末尾)
pub async fn add_member(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<BoardMemberCreate>,
) -> AppResult<Json<BoardMember>> {
    payload.validate()?;
    Ok(Json(repo(&state).add_member(&id, payload).await?))
}

/// PUT /api/seasons/admin/:id/board-members/:member_id - 更新成员
pub async fn update_member(
    State(state): State<ServerState>,
    Path((id, member_id)): Path<(String, String)>,
    Json(payload): Json<BoardMemberUpdate>,
) -> AppResult<Json<BoardMember>> {
    payload.validate()?;
    Ok(Json(repo(&state).update_member(&id, &member_id, payload).await?))
}

/// DELETE /api/seasons/admin/:id/board-members/:member_id - 移除成员并压缩顺序
pub async fn remove_member(
    State(state): State<ServerState>,
    Path((id, member_id)): Path<(String, String)>,
) -> AppResult<Json<AppResponse<bool>>> {
    let removed = repo(&state).remove_member(&id, &member_id).await?;
    state.media.destroy_quietly(&removed.avatar).await;
    Ok(ok_with_message(true, "Board member deleted successfully"))
}

/// PATCH /api/seasons/admin/:id/board-members/:member_id/order - 移动成员位置
pub async fn move_member(
    State(state): State<ServerState>,
    Path((id, member_id)): Path<(String, String)>,
    Json(payload): Json<OrderPayload>,
) -> AppResult<Json<Vec<BoardMember>>> {
    Ok(Json(repo(&state).move_member(&id, &member_id, payload.order).await?))
}

/// PATCH /api/seasons/admin/:id/board-members/:member_id/leader - 设为队长
pub async fn set_leader(
    State(state): State<ServerState>,
    Path((id, member_id)): Path<(String, String)>,
) -> AppResult<Json<Season>> {
    Ok(Json(repo(&state).set_leader(&id, &member_id).await?))
}

/// POST /api/seasons/admin/:id/board-members/:member_id/avatar - 上传头像
pub async fn upload_avatar(
    State(state): State<ServerState>,
    Path((id, member_id)): Path<(String, String)>,
    multipart: Multipart,
) -> AppResult<Json<BoardMember>> {
    let image = read_image_field(multipart).await?;
    let uploaded = state
        .media
        .upload(image.bytes, &image.file_name, "board-members")
        .await?;

    let (member, old) = repo(&state).set_member_avatar(&id, &member_id, uploaded).await?;
    state.media.destroy_quietly(&old).await;
    Ok(Json(member))
}

// ==================== Highlights ====================

/// POST /api/seasons/admin/:id/highlights - 添加亮点 (追加到末尾)
pub async fn add_highlight(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<HighlightCreate>,
) -> AppResult<Json<Highlight>> {
    payload.validate()?;
    Ok(Json(repo(&state).add_highlight(&id, payload).await?))
}

/// PUT /api/seasons/admin/:id/highlights/:highlight_id - 更新亮点
pub async fn update_highlight(
    State(state): State<ServerState>,
    Path((id, highlight_id)): Path<(String, String)>,
    Json(payload): Json<HighlightUpdate>,
) -> AppResult<Json<Highlight>> {
    payload.validate()?;
    Ok(Json(repo(&state).update_highlight(&id, &highlight_id, payload).await?))
}

/// DELETE /api/seasons/admin/:id/highlights/:highlight_id - 移除亮点并压缩顺序
pub async fn remove_highlight(
    State(state): State<ServerState>,
    Path((id, highlight_id)): Path<(String, String)>,
) -> AppResult<Json<AppResponse<bool>>> {
    let removed = repo(&state).remove_highlight(&id, &highlight_id).await?;
    state.media.destroy_quietly(&removed.image).await;
    Ok(ok_with_message(true, "Highlight deleted successfully"))
}

/// PATCH /api/seasons/admin/:id/highlights/:highlight_id/order - 移动亮点位置
pub async fn move_highlight(
    State(state): State<ServerState>,
    Path((id, highlight_id)): Path<(String, String)>,
    Json(payload): Json<OrderPayload>,
) -> AppResult<Json<Vec<Highlight>>> {
    Ok(Json(repo(&state).move_highlight(&id, &highlight_id, payload.order).await?))
}

/// POST /api/seasons/admin/:id/highlights/:highlight_id/image - 上传亮点配图
pub async fn upload_highlight_image(
    State(state): State<ServerState>,
    Path((id, highlight_id)): Path<(String, String)>,
    multipart: Multipart,
) -> AppResult<Json<Highlight>> {
    let image = read_image_field(multipart).await?;
    let uploaded = state
        .media
        .upload(image.bytes, &image.file_name, "highlights")
        .await?;

    let (highlight, old) = repo(&state)
        .set_highlight_image(&id, &highlight_id, uploaded)
        .await?;
    state.media.destroy_quietly(&old).await;
    Ok(Json(highlight))
}
