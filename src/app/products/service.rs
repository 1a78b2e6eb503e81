//! 产品业务服务

use std::sync::Arc;

use tracing::info;
use validator::Validate;

use super::model::{CreateProductForm, Product};
use crate::core::error::CoreError;
use crate::infrastructure::store::CatalogStore;
use crate::infrastructure::uploads::UploadDir;

#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn CatalogStore>,
    uploads: UploadDir,
    max_images: usize,
}

impl ProductService {
    pub fn new(store: Arc<dyn CatalogStore>, uploads: UploadDir, max_images: usize) -> Self {
        Self {
            store,
            uploads,
            max_images,
        }
    }

    pub fn uploads(&self) -> &UploadDir {
        &self.uploads
    }

    pub fn max_images(&self) -> usize {
        self.max_images
    }

    /// 获取全部产品，主图为空时补为第一张图片
    pub fn list_products(&self) -> Vec<Product> {
        let mut products = self.store.load_all();
        for product in &mut products {
            product.ensure_image_url();
        }
        products
    }

    /// 校验表单并追加新产品
    ///
    /// `images` 为已写入上传目录的公开地址。校验失败时这些文件不会被删除。
    pub fn create_product(
        &self,
        form: CreateProductForm,
        images: Vec<String>,
    ) -> Result<Product, CoreError> {
        if form.validate().is_err() {
            return Err(CoreError::BadRequest("标题和描述为必填项".to_string()));
        }

        let image_url = images.first().cloned().unwrap_or_default();
        let product = Product {
            id: chrono::Utc::now().timestamp_millis() as u64,
            title: form.title.unwrap_or_default(),
            category: form.category.unwrap_or_default(),
            description: form.description.unwrap_or_default(),
            power: form.power.unwrap_or_default(),
            price: form.price.unwrap_or_default(),
            images,
            image_url,
            ..Default::default()
        };

        // 读取-追加-整体写回，保存失败不影响响应
        let mut products = self.store.load_all();
        products.push(product.clone());
        self.store.save_all(&products);

        info!(
            "✅ 创建产品 {} ({})，图片 {} 张，目录共 {} 个产品",
            product.id,
            product.title,
            product.images.len(),
            products.len()
        );

        Ok(product)
    }
}
