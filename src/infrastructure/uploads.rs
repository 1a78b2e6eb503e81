//! 图片上传目录

use std::io;
use std::path::{Path, PathBuf};

use rand::Rng;

/// 上传文件的公开访问前缀
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// 上传目录，负责生成文件名、写入文件、给出公开地址
#[derive(Debug, Clone)]
pub struct UploadDir {
    root: PathBuf,
}

impl UploadDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// 递归创建上传目录，启动时调用一次
    pub fn ensure_exists(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.root)
    }

    /// 写入一个上传文件，返回其公开地址
    pub async fn store(&self, original_name: Option<&str>, bytes: &[u8]) -> io::Result<String> {
        let filename = unique_filename(original_name);
        tokio::fs::write(self.root.join(&filename), bytes).await?;
        Ok(public_url(&filename))
    }
}

/// 生成 `<毫秒时间戳>-<随机数><.扩展名>` 格式的文件名
pub fn unique_filename(original_name: Option<&str>) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::thread_rng().gen_range(0..=1_000_000_000);
    format!("{}-{}{}", millis, suffix, extension_of(original_name))
}

/// 原始文件名的扩展名（包含点号），没有扩展名时为空串
fn extension_of(original_name: Option<&str>) -> String {
    original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default()
}

pub fn public_url(filename: &str) -> String {
    format!("{}/{}", UPLOADS_URL_PREFIX, filename)
}
