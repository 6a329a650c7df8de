//! 认证模块
//!
//! - [`JwtService`] - JWT 签发与验证
//! - [`require_auth`] - 认证中间件
//! - [`CurrentAdmin`] - 当前管理员上下文

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use extractor::CurrentAdmin;
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
