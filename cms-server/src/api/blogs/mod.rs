//! Blog API 模块

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/blogs", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/slug/{slug}", get(handler::get_by_slug))
        .route("/popular", get(handler::popular))
        .route("/admin", get(handler::list_admin))
        .route("/{id}", put(handler::update).delete(handler::delete))
}
