//! 批量名单处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责整份名单的处理。
//!
//! ## 核心功能
//!
//! 1. **启动检查**：名单文件、默认图片必须存在
//! 2. **目录准备**：创建头像缓存目录和输出目录
//! 3. **加载名单**：丢弃表头，读取所有行
//! 4. **逐行处理**：一行处理完再开始下一行，任何一行失败都不中断批处理
//! 5. **全局统计**：汇总成功、失败、跳过的行数
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单行的细节，委托给 `RowFlow`
//! - **顺序执行**：没有并发，也没有重试

use crate::clients::RobloxClient;
use crate::config::Config;
use crate::error::{AppResult, FileError};
use crate::infrastructure::{CommandRenderer, NametagRenderer};
use crate::models::{load_roster, RosterRow};
use crate::utils::logging::{log_roster_loaded, log_startup, print_final_stats};
use crate::workflow::{ProcessResult, RowFlow};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

/// 应用主结构
pub struct App<R> {
    config: Config,
    flow: RowFlow<R>,
}

impl App<CommandRenderer> {
    /// 使用外部生成命令初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        let renderer = CommandRenderer::new(&config);
        Self::with_renderer(config, renderer)
    }
}

impl<R: NametagRenderer> App<R> {
    /// 使用指定的生成器初始化应用
    pub fn with_renderer(config: Config, renderer: R) -> Result<Self> {
        let client = RobloxClient::new(&config).context("无法创建 Roblox API 客户端")?;
        let flow = RowFlow::new(&config, client, renderer);
        Ok(Self { config, flow })
    }

    /// 启动检查：名单文件和默认图片都必须存在
    pub fn preflight(&self, csv_path: &Path) -> AppResult<()> {
        if !csv_path.exists() {
            return Err(FileError::NotFound {
                path: csv_path.to_path_buf(),
            }
            .into());
        }
        if !self.config.default_image.exists() {
            return Err(FileError::DefaultImageNotFound {
                path: self.config.default_image.clone(),
            }
            .into());
        }
        Ok(())
    }

    /// 运行整份名单
    ///
    /// 只有启动检查、目录创建、名单读取失败时返回错误，单行失败只计入统计
    pub async fn run(&self, csv_path: &Path) -> Result<BatchStats> {
        self.preflight(csv_path)?;

        log_startup(csv_path);

        self.prepare_dirs().await?;

        let lines = load_roster(csv_path)?;
        log_roster_loaded(lines.len());

        let mut stats = BatchStats {
            total: lines.len(),
            ..Default::default()
        };

        for line in &lines {
            let Some(row) = RosterRow::parse(line) else {
                debug!("[第 {} 行] 列数不足或姓名为空，跳过", line.line_number);
                stats.skipped += 1;
                continue;
            };

            let report = self.flow.run(&row).await;

            match report.result {
                ProcessResult::Success => stats.success += 1,
                ProcessResult::Failed => stats.failed += 1,
            }
            if report.used_default_image() {
                stats.fallback += 1;
            }
        }

        print_final_stats(
            stats.success,
            stats.failed,
            stats.skipped,
            stats.fallback,
            &self.config.output_dir,
        );

        Ok(stats)
    }

    /// 创建缓存目录和输出目录
    async fn prepare_dirs(&self) -> AppResult<()> {
        for dir in [self.flow.avatars().cache_dir(), self.config.output_dir.as_path()] {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|source| FileError::CreateDirFailed {
                    path: dir.to_path_buf(),
                    source,
                })?;
        }
        Ok(())
    }
}

/// 处理统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchStats {
    /// 表头之后的行数
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    /// 列数不足或姓名为空
    pub skipped: usize,
    /// 使用默认图片的行数（含生成失败的行）
    pub fallback: usize,
}
