use cms_server::{Config, Server, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 日志)
    setup_environment();

    tracing::info!("CMS server starting...");

    // 2. 加载配置
    let config = Config::from_env();

    // 3. 启动 HTTP 服务器
    let server = Server::new(config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
