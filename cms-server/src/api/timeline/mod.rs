//! Timeline API 模块

mod handler;

use axum::{
    Router,
    routing::{get, patch, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/timeline", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Public
        .route("/", get(handler::view))
        .route("/sections", get(handler::list_sections).post(handler::create_section))
        .route("/sections/{id}/phases", get(handler::section_phases))
        // Section admin
        .route("/admin/sections", get(handler::list_sections_admin))
        .route(
            "/sections/{id}",
            put(handler::update_section).delete(handler::delete_section),
        )
        .route("/sections/{id}/order", patch(handler::reorder_section))
        .route("/admin/sections/{id}/phases", get(handler::section_phases_admin))
        // Phases
        .route("/phases", post(handler::create_phase))
        .route(
            "/phases/{id}",
            put(handler::update_phase).delete(handler::delete_phase),
        )
        .route("/phases/{id}/toggle-active", patch(handler::toggle_phase))
        .route("/phases/{id}/order", patch(handler::reorder_phase))
}
