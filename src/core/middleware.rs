//! 核心中间件模块

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use crate::infrastructure::uploads::UPLOADS_URL_PREFIX;

/// 请求 ID 响应头
pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// 请求所属的资源类别，用于日志归类
fn resource_kind(path: &str) -> &'static str {
    if path.starts_with("/api/") {
        "api"
    } else if path.starts_with(UPLOADS_URL_PREFIX) {
        "uploads"
    } else {
        "static"
    }
}

/// 沿用客户端传入的合法 UUID，否则生成新的
fn request_id_of(req: &Request) -> Uuid {
    req.headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4)
}

/// 请求日志中间件
///
/// 每个请求在独立 span 中执行，存储与上传日志都带上同一个 `request_id`，
/// 并通过 `x-request-id` 响应头返回。
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = request_id_of(&req);
    let kind = resource_kind(req.uri().path());
    let span = info_span!(
        "request",
        %request_id,
        method = %req.method(),
        path = %req.uri().path(),
        kind,
    );

    let mut response = next.run(req).instrument(span.clone()).await;
    let status = response.status();
    let elapsed_ms = start.elapsed().as_millis() as u64;

    span.in_scope(|| {
        if status.is_server_error() {
            error!(status = status.as_u16(), elapsed_ms, "请求失败");
        } else {
            info!(status = status.as_u16(), elapsed_ms, "请求完成");
        }
    });

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER.clone(), value);
    }

    response
}
