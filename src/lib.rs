//! # Nametag Batch
//!
//! 读取 CSV 名单，为每个人批量生成铭牌 PDF，有 Roblox 用户名时带上头像
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Clients / Infrastructure）
//! - `clients/` - `RobloxClient`，封装用户查询、缩略图查询和图片下载
//! - `infrastructure/` - `NametagRenderer` trait 与外部命令实现 `CommandRenderer`
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个用户名
//! - `IdentityResolver` - 用户名 → 用户 ID
//! - `AvatarCache` - 用户 ID → 本地头像文件（只写一次的磁盘缓存）
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一行名单"的完整处理流程
//! - `RowCtx` - 上下文封装（行号 + 姓名）
//! - `RowFlow` - 流程编排（查头像 → 兜底默认图片 → 生成）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 启动检查、加载名单、逐行处理、汇总统计
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::RobloxClient;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{CommandRenderer, NametagRenderer};
pub use models::{NametagJob, RosterLine, RosterRow};
pub use orchestrator::{App, BatchStats};
pub use utils::sanitize_filename;
pub use workflow::{ProcessResult, RowCtx, RowFlow, RowReport};
