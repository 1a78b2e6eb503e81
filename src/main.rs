use std::sync::Arc;

use anyhow::Context;
use product_catalog::{
    build_router, config, infrastructure::logger::Logger, AppState, JsonFileStore, UploadDir,
};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, source) = config::load_config()?;
    let _log_guard = Logger::init(&config.logging)?;

    info!("启动产品目录服务...");
    match source {
        Some(path) => info!("从配置文件加载: {}", path),
        None => info!("未找到配置文件，使用默认配置"),
    }

    UploadDir::new(&config.storage.uploads_dir)
        .ensure_exists()
        .with_context(|| {
            format!(
                "无法创建上传目录 {}",
                config.storage.uploads_dir.display()
            )
        })?;

    let store = Arc::new(JsonFileStore::new(&config.storage.data_file));
    let state = AppState::from_config(&config, store);
    let app = build_router(state, &config);

    let addr = config.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("无法绑定到 {}", addr))?;

    info!("🚀 服务器运行在 http://{}", addr);
    info!("📖 API 端点:");
    info!("   GET  /api/products  - 获取所有产品");
    info!("   POST /api/products  - 创建产品（最多 {} 张图片）", config.storage.max_images);
    info!("   GET  /uploads/*     - 上传的图片");

    axum::serve(listener, app).await.context("服务器运行失败")?;
    Ok(())
}
