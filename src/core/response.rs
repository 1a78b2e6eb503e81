//! 核心响应处理模块

use serde::Serialize;

/// 成功创建产品的响应：`{ "ok": true, "product": ... }`
#[derive(Debug, Serialize)]
pub struct ProductResponse<T> {
    pub ok: bool,
    pub product: T,
}

impl<T> ProductResponse<T> {
    pub fn success(product: T) -> Self {
        Self { ok: true, product }
    }
}

/// 错误响应：`{ "ok": false, "error": ... }`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }
}
