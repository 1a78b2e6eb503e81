//! 产品处理器

use axum::{
    extract::{multipart::MultipartError, FromRequest, Multipart, Request, State},
    http::header,
    response::Json,
    Form,
};
use tracing::debug;

use super::{
    model::{CreateProductForm, Product},
    service::ProductService,
};
use crate::core::{error::CoreError, response::ProductResponse};

/// 图片文件所在的表单字段名
pub const IMAGES_FIELD: &str = "images";

#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
}

/// 图片上传错误
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("解析上传内容失败: {0}")]
    Multipart(String),
    #[error("图片数量超过上限 {0}")]
    TooManyFiles(usize),
    #[error("意外的文件字段: {0}")]
    UnexpectedField(String),
    #[error("保存图片失败: {0}")]
    Io(#[from] std::io::Error),
}

impl From<MultipartError> for UploadError {
    fn from(err: MultipartError) -> Self {
        UploadError::Multipart(err.body_text())
    }
}

impl From<UploadError> for CoreError {
    fn from(err: UploadError) -> Self {
        CoreError::InternalServerError(format!("图片上传失败: {}", err))
    }
}

pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.product_service.list_products())
}

pub async fn create_product(
    State(state): State<AppState>,
    req: Request,
) -> Result<Json<ProductResponse<Product>>, CoreError> {
    let (form, images) = read_payload(&state, req).await?;
    let product = state.product_service.create_product(form, images)?;
    Ok(Json(ProductResponse::success(product)))
}

/// 按 Content-Type 解析请求体
///
/// multipart 请求会在解析过程中把图片写入上传目录；
/// JSON 与 urlencoded 请求只携带文本字段；其他类型视为空表单。
async fn read_payload(
    state: &AppState,
    req: Request,
) -> Result<(CreateProductForm, Vec<String>), CoreError> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| UploadError::Multipart(e.body_text()))?;
        Ok(collect_multipart(&state.product_service, multipart).await?)
    } else if content_type.starts_with("application/json") {
        let Json(form) = Json::<CreateProductForm>::from_request(req, state)
            .await
            .map_err(|e| CoreError::BadRequest(e.body_text()))?;
        Ok((form, Vec::new()))
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        let Form(form) = Form::<CreateProductForm>::from_request(req, state)
            .await
            .map_err(|e| CoreError::BadRequest(e.body_text()))?;
        Ok((form, Vec::new()))
    } else {
        debug!("未识别的 Content-Type: {:?}", content_type);
        Ok((CreateProductForm::default(), Vec::new()))
    }
}

/// 逐个读取 multipart 字段，文件字段立即写盘
async fn collect_multipart(
    service: &ProductService,
    mut multipart: Multipart,
) -> Result<(CreateProductForm, Vec<String>), UploadError> {
    let mut form = CreateProductForm::default();
    let mut images = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                if name != IMAGES_FIELD {
                    return Err(UploadError::UnexpectedField(name));
                }
                if images.len() >= service.max_images() {
                    return Err(UploadError::TooManyFiles(service.max_images()));
                }

                let bytes = field.bytes().await?;
                let url = service.uploads().store(Some(&file_name), &bytes).await?;
                debug!("已保存图片 {} -> {}", file_name, url);
                images.push(url);
            }
            None => {
                let value = field.text().await?;
                form.set_field(&name, value);
            }
        }
    }

    Ok((form, images))
}
