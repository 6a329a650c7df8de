//! Server Implementation
//!
//! HTTP 服务器启动和路由装配

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::{Config, ServerState};
use crate::utils::AppError;

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self { config, state: None }
    }

    /// Create server with existing state (tests inject an in-memory db)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self { config, state: Some(state) }
    }

    pub async fn run(&self) -> Result<(), AppError> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await?,
        };

        state.start_background_tasks();

        let app = create_router(state);

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!("CMS server starting on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
            })
            .await
            .map_err(|e| AppError::internal(format!("Server error: {e}")))
    }
}

/// 装配全部 API 路由与中间件
///
/// 中间件顺序：认证 → CORS → 压缩 → 访问日志
pub fn create_router(state: ServerState) -> Router {
    Router::new()
        .merge(crate::api::health::router())
        .merge(crate::api::auth::router())
        .merge(crate::api::upload::router())
        .merge(crate::api::hero::router())
        .merge(crate::api::events::router())
        .merge(crate::api::home_events::router())
        .merge(crate::api::page_events::router())
        .merge(crate::api::seasons::router())
        .merge(crate::api::timeline::router())
        .merge(crate::api::awards::router())
        .merge(crate::api::sponsors::router())
        .merge(crate::api::blogs::router())
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
