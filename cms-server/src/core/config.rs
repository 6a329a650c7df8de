//! 服务器配置
//!
//! # 环境变量
//!
//! 所有配置项都可以通过环境变量覆盖：
//!
//! | 环境变量 | 默认值 | 说明 |
//! |----------|--------|------|
//! | WORK_DIR | ./data | 工作目录 (数据库、日志) |
//! | HTTP_PORT | 5000 | HTTP 服务端口 |
//! | ENVIRONMENT | development | 运行环境 |
//! | JWT_SECRET | (dev fallback) | JWT 密钥，生产必填 |
//! | JWT_EXPIRATION_MINUTES | 1440 | 令牌有效期 |
//! | ADMIN_EMAIL / ADMIN_PASSWORD | - | 首次启动时的引导账号 |
//! | MEDIA_CLOUD_NAME / MEDIA_API_KEY / MEDIA_API_SECRET | - | 媒体托管凭证 |
//! | MEDIA_FOLDER | cms | 媒体托管根目录 |
//!
//! # 示例
//!
//! ```ignore
//! WORK_DIR=/var/lib/cms HTTP_PORT=8080 cargo run
//! ```

use crate::auth::JwtConfig;

#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库和日志文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 引导管理员账号 (仅在 admin 表为空时生效)
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    /// 从环境变量加载配置，未设置的项使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            admin_email: std::env::var("ADMIN_EMAIL").ok(),
            admin_password: std::env::var("ADMIN_PASSWORD").ok(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
