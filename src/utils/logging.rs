/// 日志工具模块
///
/// 提供日志初始化和批处理横幅输出的辅助函数
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 日志
///
/// `RUST_LOG` 优先；未设置时默认 `info`，`verbose` 时为 `debug`
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `csv_path`: 名单文件
pub fn log_startup(csv_path: &Path) {
    info!("{}", "=".repeat(40));
    info!("🚀 开始处理名单: {}", csv_path.display());
    info!(
        "启动时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(40));
}

/// 记录名单加载信息
pub fn log_roster_loaded(total: usize) {
    info!("✓ 共读取 {} 行数据（不含表头）", total);
}

/// 打印最终统计信息
///
/// # 参数
/// - `success`: 成功数量
/// - `failed`: 失败数量
/// - `skipped`: 跳过的行数
/// - `fallback`: 使用默认图片的数量
/// - `output_dir`: 输出目录
pub fn print_final_stats(
    success: usize,
    failed: usize,
    skipped: usize,
    fallback: usize,
    output_dir: &Path,
) {
    info!("\n{}", "=".repeat(40));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 成功: {}/{}", success, success + failed);
    info!("❌ 失败: {}", failed);
    info!("⏭️ 跳过: {}", skipped);
    info!("🖼️ 使用默认图片: {}", fallback);
    info!("{}", "=".repeat(40));
    info!("Done! 输出文件位于: {}", output_dir.display());
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数，按末尾截取
pub fn tail_text(text: &str, max_len: usize) -> String {
    let count = text.chars().count();
    if count > max_len {
        "...".to_string() + &text.chars().skip(count - max_len).collect::<String>()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail_text() {
        assert_eq!(tail_text("short", 10), "short");
        assert_eq!(tail_text("abcdefghij", 3), "...hij");
        assert_eq!(tail_text("错误：找不到字体", 4), "...不到字体");
    }
}
