//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 认证相关接口
//! - [`upload`] - 图片上传代理
//! - [`hero`] - 首页 Hero 轮播管理
//! - [`events`] - 活动卡片管理
//! - [`home_events`] - 首页活动卡片管理
//! - [`page_events`] - 活动页管理
//! - [`seasons`] - 赛季管理 (含董事会成员与亮点)
//! - [`timeline`] - 时间线管理
//! - [`awards`] - 奖项管理
//! - [`sponsors`] - 赞助商管理
//! - [`blogs`] - 博客管理

pub mod auth;
pub mod health;
pub mod upload;

// Content entity families
pub mod awards;
pub mod blogs;
pub mod events;
pub mod hero;
pub mod home_events;
pub mod page_events;
pub mod seasons;
pub mod sponsors;
pub mod timeline;

use serde::Deserialize;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// Body of every `PATCH …/{id}/order` request.
#[derive(Debug, Deserialize)]
pub struct OrderPayload {
    pub order: i64,
}
