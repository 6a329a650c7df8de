//! Upload API 模块

pub(crate) mod handler;

use axum::{Router, extract::DefaultBodyLimit, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/upload", post(handler::upload))
        .layer(DefaultBodyLimit::max(handler::MAX_FILE_SIZE + 1024 * 1024))
}
