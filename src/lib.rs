//! # 产品目录服务
//!
//! 一个极简的产品目录后端：
//! - 产品记录整体保存在一个 JSON 数组文件中
//! - 创建产品时最多上传 5 张图片，写入上传目录并以 `/uploads/...` 对外提供
//! - 提供产品列表接口
//!
//! 存储通过 [`CatalogStore`] 注入，测试中可替换为 [`MemoryStore`]。

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

use std::sync::Arc;

pub use app::build_router;
pub use app::products::handler::AppState;
pub use app::products::model::{CreateProductForm, Product};
pub use app::products::service::ProductService;
pub use config::{Config, ConfigError};
pub use infrastructure::store::{CatalogStore, JsonFileStore, MemoryStore, StoreError};
pub use infrastructure::uploads::UploadDir;

impl AppState {
    /// 按配置组装应用状态
    pub fn from_config(config: &Config, store: Arc<dyn CatalogStore>) -> Self {
        let uploads = UploadDir::new(&config.storage.uploads_dir);
        Self {
            product_service: ProductService::new(store, uploads, config.storage.max_images),
        }
    }
}
