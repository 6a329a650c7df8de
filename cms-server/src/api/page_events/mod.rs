//! Page Event API 模块

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/page-events", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/featured", get(handler::featured))
        .route("/past", get(handler::past))
        .route("/categories", get(handler::categories))
        .route("/admin", get(handler::list_admin))
        .route(
            "/{id}",
            get(handler::get_by_id).put(handler::update).delete(handler::delete),
        )
        .route("/{id}/toggle-active", patch(handler::toggle_active))
        .route("/{id}/order", patch(handler::reorder))
}
