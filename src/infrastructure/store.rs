//! 产品目录存储
//!
//! 整个目录保存为单个 JSON 数组文件，每次读取全部、每次写入全部。
//! 不做加锁，并发写入可能丢失更新。

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::app::products::model::Product;

/// 存储错误类型
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("读写数据文件失败: {0}")]
    Io(#[from] io::Error),
    #[error("JSON 解析失败: {0}")]
    Json(#[from] serde_json::Error),
    #[error("数据文件内容不是数组")]
    NotAnArray,
}

/// 产品目录存储接口
///
/// `load_all` 永不失败，`save_all` 尽力而为，失败只记录日志。
pub trait CatalogStore: Send + Sync {
    fn load_all(&self) -> Vec<Product>;

    fn save_all(&self, products: &[Product]);
}

/// 基于 JSON 文件的存储
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 读取全部产品，文件不存在或内容为空时返回空列表
    ///
    /// 数组元素逐个解析，非对象元素跳过并记录警告，不影响其他记录。
    pub fn try_load_all(&self) -> Result<Vec<Product>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        let Value::Array(items) = serde_json::from_str::<Value>(&raw)? else {
            return Err(StoreError::NotAnArray);
        };

        let products: Vec<Product> = items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item) {
                Ok(product) => Some(product),
                Err(e) => {
                    warn!("跳过 {} 中第 {} 条无法识别的记录: {}", self.path.display(), index, e);
                    None
                }
            })
            .collect();

        Ok(products)
    }

    /// 以两空格缩进格式覆盖写入全部产品
    pub fn try_save_all(&self, products: &[Product]) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(products)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl CatalogStore for JsonFileStore {
    fn load_all(&self) -> Vec<Product> {
        match self.try_load_all() {
            Ok(products) => {
                debug!("从 {} 读取 {} 个产品", self.path.display(), products.len());
                products
            }
            Err(e) => {
                error!("读取 {} 失败: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    fn save_all(&self, products: &[Product]) {
        if let Err(e) = self.try_save_all(products) {
            error!("保存 {} 失败: {}", self.path.display(), e);
        }
    }
}

/// 内存存储，语义与文件存储一致：整体读取、整体替换
#[derive(Debug, Default)]
pub struct MemoryStore {
    products: Mutex<Vec<Product>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Mutex::new(products),
        }
    }
}

impl CatalogStore for MemoryStore {
    fn load_all(&self) -> Vec<Product> {
        match self.products.lock() {
            Ok(products) => products.clone(),
            Err(e) => {
                error!("内存存储锁已损坏: {}", e);
                Vec::new()
            }
        }
    }

    fn save_all(&self, products: &[Product]) {
        match self.products.lock() {
            Ok(mut guard) => *guard = products.to_vec(),
            Err(e) => error!("内存存储锁已损坏: {}", e),
        }
    }
}
