//! 认证中间件
//!
//! 为 JWT 认证提供 Axum 中间件。
//!
//! # 跳过认证的路径
//!
//! - `OPTIONS *` (CORS 预检)
//! - 非 `/api/` 路径
//! - `POST /api/auth/login` (登录接口)
//! - `GET /api/health`
//! - 内容实体族的公开 GET 读取 (不含 `/admin` 段)
//!
//! 其余请求 (全部变更操作和 `/admin` 列表) 必须携带有效的
//! `Authorization: Bearer <token>` 头。

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentAdmin, JwtService};
use crate::core::ServerState;
use crate::utils::AppError;

/// Entity families whose plain GET reads serve the public site.
const PUBLIC_GET_PREFIXES: &[&str] = &[
    "/api/hero",
    "/api/events",
    "/api/home-events",
    "/api/page-events",
    "/api/seasons",
    "/api/timeline",
    "/api/awards",
    "/api/sponsors",
    "/api/blogs",
];

/// Whether a request may pass without a token.
fn is_public_route(method: &http::Method, path: &str) -> bool {
    if method == http::Method::OPTIONS {
        return true;
    }
    if !path.starts_with("/api/") {
        return true;
    }
    if method == http::Method::POST && path == "/api/auth/login" {
        return true;
    }
    if method != http::Method::GET {
        return false;
    }
    if path == "/api/health" {
        return true;
    }
    // admin listings stay gated even though they are GETs
    if path.split('/').any(|segment| segment == "admin") {
        return false;
    }
    PUBLIC_GET_PREFIXES.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

/// 认证中间件 - 要求请求携带有效令牌
///
/// 验证成功后将 [`CurrentAdmin`] 注入请求扩展。
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if is_public_route(req.method(), req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or(AppError::InvalidToken)?,
        None => {
            tracing::warn!(target: "security", uri = %req.uri(), "Request without authorization header");
            return Err(AppError::Unauthorized);
        }
    };

    match state.jwt_service.validate_token(token) {
        Ok(claims) => {
            let admin = CurrentAdmin::from(claims);
            req.extensions_mut().insert(admin);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(target: "security", error = %e, uri = %req.uri(), "Token validation failed");
            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::TokenExpired),
                _ => Err(AppError::InvalidToken),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    #[test]
    fn public_reads_pass() {
        assert!(is_public_route(&Method::GET, "/api/events"));
        assert!(is_public_route(&Method::GET, "/api/events/event:abc"));
        assert!(is_public_route(&Method::GET, "/api/timeline/sections"));
        assert!(is_public_route(&Method::GET, "/api/sponsors"));
        assert!(is_public_route(&Method::GET, "/api/health"));
        assert!(is_public_route(&Method::POST, "/api/auth/login"));
        assert!(is_public_route(&Method::OPTIONS, "/api/events"));
        assert!(is_public_route(&Method::GET, "/assets/logo.png"));
    }

    #[test]
    fn admin_listings_stay_gated() {
        assert!(!is_public_route(&Method::GET, "/api/events/admin"));
        assert!(!is_public_route(&Method::GET, "/api/seasons/admin/all"));
        assert!(!is_public_route(&Method::GET, "/api/blogs/admin"));
        assert!(!is_public_route(&Method::GET, "/api/auth/me"));
    }

    #[test]
    fn mutations_stay_gated() {
        assert!(!is_public_route(&Method::POST, "/api/events"));
        assert!(!is_public_route(&Method::PUT, "/api/events/event:abc"));
        assert!(!is_public_route(&Method::PATCH, "/api/events/event:abc/order"));
        assert!(!is_public_route(&Method::DELETE, "/api/events/event:abc"));
        assert!(!is_public_route(&Method::POST, "/api/upload"));
    }

    #[test]
    fn prefix_matching_is_boundary_aware() {
        // "/api/eventsomething" must not inherit the events prefix
        assert!(!is_public_route(&Method::GET, "/api/eventsomething"));
    }
}
