//! Health API 模块

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

/// GET /api/health - 健康检查
async fn health() -> Json<Value> {
    Json(json!({ "message": "Server is running!" }))
}
