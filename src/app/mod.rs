//! 应用层：路由与产品接口

pub mod products;

use std::time::Duration;

use axum::{extract::DefaultBodyLimit, middleware, routing::get, Router};
use tower_http::{services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::Config;
use crate::core::middleware::request_logging_middleware;
use crate::infrastructure::uploads::UPLOADS_URL_PREFIX;
use products::handler::{self, AppState};

/// 构建完整路由
///
/// - `GET/POST /api/products` 产品接口
/// - `/uploads/*` 上传图片
/// - 其他路径回落到静态资源目录
pub fn build_router(state: AppState, config: &Config) -> Router {
    let api = Router::new()
        .route(
            "/api/products",
            get(handler::list_products).post(handler::create_product),
        )
        .layer(DefaultBodyLimit::max(config.http.max_body_bytes))
        .with_state(state);

    api.nest_service(UPLOADS_URL_PREFIX, ServeDir::new(&config.storage.uploads_dir))
        .fallback_service(ServeDir::new(&config.storage.public_dir))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.http.timeout_seconds,
        )))
        .layer(TraceLayer::new_for_http())
}
