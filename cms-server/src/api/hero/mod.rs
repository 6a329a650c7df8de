//! Hero API 模块

mod handler;

use axum::{
    Router,
    routing::{get, patch, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/hero", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .route("/{id}/order", patch(handler::reorder))
}
