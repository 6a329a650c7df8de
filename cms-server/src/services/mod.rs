//! 服务模块
//!
//! - [`MediaService`] - 外部媒体托管 (上传/删除)
//! - [`ViewTracker`] - 浏览计数防抖缓存

pub mod media;
pub mod view_tracker;

pub use media::{MediaConfig, MediaService};
pub use view_tracker::ViewTracker;
