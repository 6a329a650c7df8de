//! 核心模块 - 配置、状态与服务器装配

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::{Server, create_router};
pub use state::ServerState;
