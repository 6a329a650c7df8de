//! Award API 模块

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/awards", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/admin", get(handler::list_admin))
        .route("/type/{award_type}", get(handler::list_by_type))
        .route("/year/{year}", get(handler::list_by_year))
        .route(
            "/{id}",
            get(handler::get_by_id).put(handler::update).delete(handler::delete),
        )
        .route("/{id}/toggle-active", patch(handler::toggle_active))
        .route("/{id}/order", patch(handler::reorder))
}
