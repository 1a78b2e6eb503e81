//! 服务配置
//!
//! 配置来源（优先级从低到高）：默认值 → `config.toml` / `./config/config.toml` → 环境变量 `PORT`

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// 默认监听端口
pub const DEFAULT_PORT: u16 = 4000;

/// 单个产品允许的最大图片数量
pub const MAX_IMAGES_LIMIT: usize = 5;

/// 产品目录服务配置结构
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP 服务配置
    pub http: HttpConfig,
    /// 存储配置
    pub storage: StorageConfig,
    /// 日志配置
    pub logging: LoggingConfig,
}

/// HTTP 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// 绑定地址
    pub bind_address: String,
    /// HTTP 服务端口
    pub port: u16,
    /// 请求超时时间（秒）
    pub timeout_seconds: u64,
    /// 请求体大小上限（字节）
    pub max_body_bytes: usize,
}

/// 存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// 产品数据 JSON 文件
    pub data_file: PathBuf,
    /// 静态资源目录
    pub public_dir: PathBuf,
    /// 图片上传目录
    pub uploads_dir: PathBuf,
    /// 每个产品最多图片数
    pub max_images: usize,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志文件目录
    pub log_dir: PathBuf,
    /// 日志文件名前缀
    pub file_prefix: String,
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
    /// 是否启用控制台输出
    pub console_output: bool,
    /// 是否写入按日滚动的日志文件
    pub file_output: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            timeout_seconds: 30,
            max_body_bytes: 25 * 1024 * 1024,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("products.json"),
            public_dir: PathBuf::from("public"),
            uploads_dir: PathBuf::from("public/uploads"),
            max_images: MAX_IMAGES_LIMIT,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            file_prefix: "catalog".to_string(),
            level: "info".to_string(),
            console_output: true,
            file_output: false,
        }
    }
}

impl Config {
    /// 从配置文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::FileRead(e.to_string()))?;

        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        Ok(config)
    }

    /// 使用环境变量 `PORT` 覆盖端口
    ///
    /// 无法解析的值会被忽略并记录警告。
    pub fn apply_port_override(&mut self, port: Option<&str>) {
        let Some(raw) = port.map(str::trim).filter(|p| !p.is_empty()) else {
            return;
        };

        match raw.parse::<u16>() {
            Ok(port) => self.http.port = port,
            Err(e) => warn!("忽略无效的 PORT 环境变量 {:?}: {}", raw, e),
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::Validation("HTTP端口必须大于0".to_string()));
        }
        if self.http.bind_address.is_empty() {
            return Err(ConfigError::Validation("绑定地址不能为空".to_string()));
        }

        if self.storage.data_file.as_os_str().is_empty() {
            return Err(ConfigError::Validation("数据文件路径不能为空".to_string()));
        }
        if self.storage.max_images == 0 || self.storage.max_images > MAX_IMAGES_LIMIT {
            return Err(ConfigError::Validation(format!(
                "图片数量上限必须在 1 到 {} 之间",
                MAX_IMAGES_LIMIT
            )));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "无效的日志级别: {}，有效值: {:?}",
                self.logging.level, valid_levels
            )));
        }

        Ok(())
    }

    /// 监听地址，形如 `0.0.0.0:4000`
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.http.bind_address, self.http.port)
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("文件读取错误: {0}")]
    FileRead(String),
    #[error("配置解析错误: {0}")]
    Parse(String),
    #[error("配置验证错误: {0}")]
    Validation(String),
}

/// 从文件或默认值加载配置，并应用环境变量覆盖
///
/// 返回配置及其来源文件；此时日志系统尚未初始化，来源由调用方记录。
pub fn load_config() -> Result<(Config, Option<&'static str>), ConfigError> {
    let config_paths = ["config.toml", "./config/config.toml"];
    let source = config_paths.into_iter().find(|p| Path::new(p).exists());

    let mut config = match source {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };

    config.apply_port_override(std::env::var("PORT").ok().as_deref());
    config.validate()?;

    Ok((config, source))
}
