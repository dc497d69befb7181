//! 头像缓存服务 - 业务能力层
//!
//! 缓存文件 `<cache_dir>/<username>.png` 只写一次，存在即视为有效

use crate::clients::RobloxClient;
use crate::error::{AppResult, ApiError, FileError};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// PNG 文件头
pub const PNG_SIGNATURE: &[u8] = b"\x89PNG";

/// 缓存头像的扩展名
const AVATAR_EXTENSION: &str = "png";

/// 头像缓存服务
///
/// 职责：
/// - 命中缓存时直接返回路径，不发请求
/// - 未命中时查缩略图地址 → 下载 → 校验 PNG → 写入缓存
/// - 任何一步失败都返回 `None`，由调用方改用默认图片
pub struct AvatarCache {
    client: RobloxClient,
    cache_dir: PathBuf,
}

impl AvatarCache {
    pub fn new(client: RobloxClient, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            cache_dir: cache_dir.into(),
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// 用户名对应的缓存路径
    pub fn cache_path(&self, username: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.{}", username, AVATAR_EXTENSION))
    }

    /// 只查缓存，不发请求
    pub fn cached(&self, username: &str) -> Option<PathBuf> {
        let path = self.cache_path(username);
        path.exists().then_some(path)
    }

    /// 获取头像，必要时下载
    ///
    /// # 参数
    /// - `user_id`: 已解析的 Roblox 用户 ID
    /// - `username`: 原始用户名，作为缓存键
    pub async fn fetch(&self, user_id: u64, username: &str) -> Option<PathBuf> {
        if let Some(path) = self.cached(username) {
            info!("  [CACHED] 头像已存在: {}", path.display());
            return Some(path);
        }

        info!("  [DOWNLOAD] 正在下载 {} 的头像 (ID: {})...", username, user_id);

        match self.download(user_id, username).await {
            Ok(path) => Some(path),
            Err(e) => {
                error!("  ❌ 下载头像失败: {}", e);
                None
            }
        }
    }

    async fn download(&self, user_id: u64, username: &str) -> AppResult<PathBuf> {
        let image_url = self.client.fetch_headshot_url(user_id).await?;
        let image_data = self.client.download_image(&image_url).await?;

        if !image_data.starts_with(PNG_SIGNATURE) {
            return Err(ApiError::NotPng { url: image_url }.into());
        }

        let output_path = self.cache_path(username);
        tokio::fs::write(&output_path, &image_data)
            .await
            .map_err(|source| FileError::WriteFailed {
                path: output_path.clone(),
                source,
            })?;

        Ok(output_path)
    }
}
