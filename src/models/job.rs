use std::fmt::Display;
use std::path::PathBuf;

/// 单个铭牌的生成任务
///
/// 每行构造一次，交给生成器后即丢弃
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NametagJob {
    pub name: String,
    pub team: String,
    /// 缓存头像或默认图片
    pub image_path: PathBuf,
    pub quote: String,
    pub output_path: PathBuf,
    /// 只有成功取到头像时才带上用户名
    pub username: Option<String>,
}

impl Display for NametagJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} | {} | 图片 {} -> {}]",
            self.name,
            self.team,
            self.image_path.display(),
            self.output_path.display()
        )
    }
}
