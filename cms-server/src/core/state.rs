//! 服务器状态
//!
//! [`ServerState`] 持有所有服务的共享引用，使用 Arc 实现浅拷贝。
//!
//! | 字段 | 类型 | 说明 |
//! |------|------|------|
//! | config | Config | 配置项 (不可变) |
//! | db | Surreal<Db> | 嵌入式数据库 |
//! | jwt_service | Arc<JwtService> | JWT 认证服务 |
//! | media | MediaService | 外部媒体托管 |
//! | views | Arc<ViewTracker> | 浏览计数防抖缓存 |

use std::sync::Arc;
use std::time::Duration;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::AdminRepository;
use crate::services::{MediaConfig, MediaService, ViewTracker};
use crate::utils::AppError;

#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT 认证服务
    pub jwt_service: Arc<JwtService>,
    /// 外部媒体托管客户端
    pub media: MediaService,
    /// 浏览计数防抖缓存
    pub views: Arc<ViewTracker>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 1. 打开数据库 (按需创建工作目录)
    /// 2. 构建各服务，按需引导管理员账号
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db_service = DbService::new(&config.work_dir).await?;
        Self::with_db(config.clone(), db_service.db).await
    }

    /// 基于给定数据库构建状态 (测试使用内存库)
    pub async fn with_db(config: Config, db: Surreal<Db>) -> Result<Self, AppError> {
        if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
            AdminRepository::new(db.clone())
                .ensure_seed(email, password)
                .await
                .map_err(|e| AppError::database(format!("Admin seed failed: {e}")))?;
        }

        let jwt_service = Arc::new(JwtService::new(config.jwt.clone()));
        let media = MediaService::new(MediaConfig::from_env());
        if !media.is_configured() {
            tracing::warn!("Media host not configured; image uploads are disabled");
        }

        Ok(Self {
            config,
            db,
            jwt_service,
            media,
            views: Arc::new(ViewTracker::new()),
        })
    }

    /// 启动后台任务 (浏览缓存定时清理)
    pub fn start_background_tasks(&self) {
        let views = self.views.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(60 * 60));
            interval.tick().await; // first tick fires immediately
            loop {
                interval.tick().await;
                views.sweep();
            }
        });
    }
}
