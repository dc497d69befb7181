//! 名单行处理流程 - 流程层
//!
//! 核心职责：定义"一行名单"的完整处理流程
//!
//! 流程顺序：
//! 1. 有用户名 → 查缓存 → 解析用户 ID → 下载头像
//! 2. 任一步失败，或没有用户名 → 默认图片
//! 3. 清洗姓名 → `<输出目录>/<姓名>.pdf`
//! 4. 调用生成器

use std::path::PathBuf;
use tracing::{debug, error, info, warn};

use crate::clients::RobloxClient;
use crate::config::Config;
use crate::infrastructure::NametagRenderer;
use crate::models::{NametagJob, RosterRow};
use crate::services::{AvatarCache, IdentityResolver};
use crate::utils::sanitize_filename;
use crate::workflow::row_ctx::RowCtx;

/// 输出文件扩展名，与头像格式无关
const OUTPUT_EXTENSION: &str = "pdf";

/// 单行处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessResult {
    /// 生成成功
    Success,
    /// 生成器失败
    Failed,
}

/// 单行处理报告
#[derive(Debug, Clone)]
pub struct RowReport {
    pub result: ProcessResult,
    pub job: NametagJob,
}

impl RowReport {
    /// 是否用了默认图片
    ///
    /// 只有拿到头像时任务才带用户名
    pub fn used_default_image(&self) -> bool {
        self.job.username.is_none()
    }
}

/// 名单行处理流程
///
/// - 编排 解析 → 取头像 → 生成 的顺序
/// - 决定何时回退到默认图片
/// - 生成器通过 trait 注入
pub struct RowFlow<R> {
    identity: IdentityResolver,
    avatars: AvatarCache,
    renderer: R,
    output_dir: PathBuf,
    default_image: PathBuf,
}

impl<R: NametagRenderer> RowFlow<R> {
    /// 创建新的处理流程
    pub fn new(config: &Config, client: RobloxClient, renderer: R) -> Self {
        Self {
            identity: IdentityResolver::new(client.clone()),
            avatars: AvatarCache::new(client, config.avatars_dir.clone()),
            renderer,
            output_dir: config.output_dir.clone(),
            default_image: config.default_image.clone(),
        }
    }

    pub fn avatars(&self) -> &AvatarCache {
        &self.avatars
    }

    /// 处理一行：构造任务并交给生成器
    pub async fn run(&self, row: &RosterRow) -> RowReport {
        let ctx = RowCtx::new(row.line_number, row.name.as_str());
        info!("\n{} 开始处理", ctx);

        let job = self.build_job(row, &ctx).await;
        debug!("{} 生成任务: {}", ctx, job);

        info!("{} 📝 正在生成铭牌: {}", ctx, job.output_path.display());

        let result = if self.renderer.render(&job).await {
            info!("{} ✅ [SUCCESS] 已生成: {}", ctx, job.output_path.display());
            ProcessResult::Success
        } else {
            error!("{} ❌ 生成铭牌失败", ctx);
            ProcessResult::Failed
        };

        RowReport { result, job }
    }

    /// 构造生成任务
    pub async fn build_job(&self, row: &RosterRow, ctx: &RowCtx) -> NametagJob {
        let (image_path, username) = self.choose_image(ctx, row.username.as_deref()).await;

        let output_path = self.output_dir.join(format!(
            "{}.{}",
            sanitize_filename(&row.name),
            OUTPUT_EXTENSION
        ));

        NametagJob {
            name: row.name.clone(),
            team: row.team.clone(),
            image_path,
            quote: row.quote.clone(),
            output_path,
            username,
        }
    }

    /// 选择图片，返回 (图片路径, 铭牌上显示的用户名)
    async fn choose_image(
        &self,
        ctx: &RowCtx,
        username: Option<&str>,
    ) -> (PathBuf, Option<String>) {
        let Some(username) = username else {
            info!("{} 未提供 Roblox 用户名，使用默认图片", ctx);
            return self.fallback();
        };

        info!("{} Roblox 用户名: {}", ctx, username);

        // 命中缓存时不再查询用户 ID
        if let Some(path) = self.avatars.cached(username) {
            info!("{} [CACHED] 头像已存在: {}", ctx, path.display());
            return (path, Some(username.to_string()));
        }

        let Some(user_id) = self.identity.resolve(username).await else {
            warn!("{} ⚠️ 找不到 Roblox 用户: {}", ctx, username);
            warn!("{} [FALLBACK] 使用默认图片", ctx);
            return self.fallback();
        };

        info!("{} 用户 ID: {}", ctx, user_id);

        match self.avatars.fetch(user_id, username).await {
            Some(path) => (path, Some(username.to_string())),
            None => {
                warn!("{} [FALLBACK] 使用默认图片", ctx);
                self.fallback()
            }
        }
    }

    fn fallback(&self) -> (PathBuf, Option<String>) {
        (self.default_image.clone(), None)
    }
}
