use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use nametag_batch::utils::logging;
use nametag_batch::{App, Config};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::error;

/// 批量铭牌生成器
///
/// 读取 CSV 名单并为每个人生成铭牌，有 Roblox 用户名时下载头像
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// CSV 名单文件（第一行为表头）
    csv_file: PathBuf,

    /// TOML 配置文件
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 输出调试日志，并给生成器加 --verbose
    #[arg(short, long)]
    verbose: bool,

    /// 让生成器输出无边框版式
    #[arg(short, long)]
    borderless: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };

    // 先加载配置，配置里的 verbose_logging 同样打开 debug 日志
    let config = load_config(&cli);
    let verbose = config.as_ref().map_or(cli.verbose, |c| c.verbose_logging);

    // 初始化日志
    logging::init(verbose);

    let result = match config {
        Ok(config) => run(config, &cli.csv_file).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("❌ {:#}", e);
            ExitCode::from(1)
        }
    }
}

/// 加载配置并合并命令行开关，相对路径按当前目录展开
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_toml_file(path)?,
        None => Config::from_env()?,
    };
    config.verbose_logging |= cli.verbose;
    config.borderless |= cli.borderless;

    let cwd = std::env::current_dir().context("无法获取当前目录")?;
    Ok(config.absolutize(&cwd))
}

async fn run(config: Config, csv_file: &Path) -> Result<()> {
    // 初始化并运行应用
    let app = App::initialize(config)?;
    app.run(csv_file).await?;

    Ok(())
}
