//! CMS Server - 营销站点内容管理后端
//!
//! # 架构概述
//!
//! 为独立的公开前端和管理后台提供结构化内容的 CRUD 接口。
//! 核心是有序集合引擎：多个实体族在并发的增删改/启停/重排操作下
//! 维护密集无空洞的 `sort_order` 序列。
//!
//! # 模块结构
//!
//! ```text
//! cms-server/src/
//! ├── core/          # 配置、状态、服务器装配
//! ├── auth/          # JWT 认证、中间件
//! ├── ordering/      # 有序集合引擎 (核心)
//! ├── db/            # 数据库层 (模型 + 仓库)
//! ├── services/      # 媒体托管、浏览计数
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 错误、日志、校验
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod ordering;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentAdmin, JwtService};
pub use core::{Config, Server, ServerState, create_router};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() {
    dotenv::dotenv().ok();
    init_logger();
}
