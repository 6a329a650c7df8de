//! Season API 模块
//!
//! 公开读取 + `/admin` 管理路由，含董事会成员与亮点两个内嵌子资源。

mod handler;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, patch, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/seasons", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Public
        .route("/", get(handler::list))
        .route("/year/{academic_year}", get(handler::get_by_year))
        .route("/{id}", get(handler::get_by_id))
        // Season admin
        .route("/admin/all", get(handler::list_admin))
        .route("/admin", post(handler::create))
        .route("/admin/{id}", put(handler::update).delete(handler::delete))
        .route("/admin/{id}/order", patch(handler::reorder))
        .route(
            "/admin/{id}/cover-image",
            post(handler::upload_cover).delete(handler::delete_cover),
        )
        // Board members
        .route("/admin/{id}/board-members", post(handler::add_member))
        .route(
            "/admin/{id}/board-members/{member_id}",
            put(handler::update_member).delete(handler::remove_member),
        )
        .route(
            "/admin/{id}/board-members/{member_id}/order",
            patch(handler::move_member),
        )
        .route(
            "/admin/{id}/board-members/{member_id}/leader",
            patch(handler::set_leader),
        )
        .route(
            "/admin/{id}/board-members/{member_id}/avatar",
            post(handler::upload_avatar),
        )
        // Highlights
        .route("/admin/{id}/highlights", post(handler::add_highlight))
        .route(
            "/admin/{id}/highlights/{highlight_id}",
            put(handler::update_highlight).delete(handler::remove_highlight),
        )
        .route(
            "/admin/{id}/highlights/{highlight_id}/order",
            patch(handler::move_highlight),
        )
        .route(
            "/admin/{id}/highlights/{highlight_id}/image",
            post(handler::upload_highlight_image),
        )
        .layer(DefaultBodyLimit::max(crate::api::upload::handler::MAX_FILE_SIZE + 1024 * 1024))
}
