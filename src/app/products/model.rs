//! 产品数据模型

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// 产品记录
///
/// 存储文件中缺失、为 `null` 或类型不符的字段按默认值读取，未知字段原样保留。
/// 只要记录是 JSON 对象就一定能读出来。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    /// 创建时间戳（毫秒）
    #[serde(deserialize_with = "lenient_id")]
    pub id: u64,
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_string")]
    pub power: String,
    #[serde(deserialize_with = "lenient_string")]
    pub price: String,
    /// 图片公开地址，按上传顺序
    #[serde(deserialize_with = "lenient_images")]
    pub images: Vec<String>,
    /// 主图地址
    #[serde(rename = "imageUrl", deserialize_with = "lenient_string")]
    pub image_url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// 主图为空时使用第一张图片
    pub fn ensure_image_url(&mut self) {
        if self.image_url.is_empty() {
            if let Some(first) = self.images.first() {
                self.image_url = first.clone();
            }
        }
    }
}

/// 创建产品的表单字段
///
/// JSON 请求中的非字符串值按真假值处理：`null`、`false`、`0` 视为缺失，
/// 其他值转为字符串。
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateProductForm {
    #[validate(required, length(min = 1))]
    #[serde(deserialize_with = "truthy_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "truthy_string")]
    pub category: Option<String>,
    #[validate(required, length(min = 1))]
    #[serde(deserialize_with = "truthy_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "truthy_string")]
    pub power: Option<String>,
    #[serde(deserialize_with = "truthy_string")]
    pub price: Option<String>,
}

impl CreateProductForm {
    /// 按字段名写入文本值，未知字段忽略
    pub fn set_field(&mut self, name: &str, value: String) {
        let slot = match name {
            "title" => &mut self.title,
            "category" => &mut self.category,
            "description" => &mut self.description,
            "power" => &mut self.power,
            "price" => &mut self.price,
            _ => return,
        };
        *slot = Some(value);
    }
}

/// 标量转字符串，`null`、数组、对象为 `None`
fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(scalar_to_string(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_images<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let images = match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(scalar_to_string)
            .filter(|url| !url.is_empty())
            .collect(),
        _ => Vec::new(),
    };
    Ok(images)
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let id = match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => 0,
    };
    Ok(id)
}

fn truthy_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = match Value::deserialize(deserializer)? {
        Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Array(items) => Some(Value::Array(items).to_string()),
        Value::Object(map) => Some(Value::Object(map).to_string()),
        other => scalar_to_string(other),
    };
    Ok(value)
}
