//! 铭牌生成器 - 基础设施层
//!
//! 外部生成进程是唯一的渲染能力提供者，这里只暴露"render(job) → 成功/失败"

use crate::config::Config;
use crate::error::RenderError;
use crate::models::NametagJob;
use crate::utils::logging::tail_text;
use std::ffi::OsString;
use std::future::Future;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, error};

/// 失败日志里保留的 stderr 字符数
const STDERR_TAIL_CHARS: usize = 400;

/// 铭牌渲染能力
///
/// 编排层只依赖这个 trait，测试时可以换成记录型的假实现
pub trait NametagRenderer {
    /// 生成一个铭牌，返回是否成功
    fn render(&self, job: &NametagJob) -> impl Future<Output = bool> + Send;
}

/// 通过外部命令生成铭牌
///
/// 职责：
/// - 拼装 `--name --team --image --quote --output [--username]` 参数
/// - 超时后强制结束进程
/// - 只以退出码判断成败，不检查输出文件
pub struct CommandRenderer {
    program: String,
    base_args: Vec<String>,
    workdir: Option<PathBuf>,
    timeout: Duration,
    verbose: bool,
    borderless: bool,
}

impl CommandRenderer {
    /// 根据配置创建
    pub fn new(config: &Config) -> Self {
        Self {
            program: config.generator_program.clone(),
            base_args: config.generator_args.clone(),
            workdir: config.generator_workdir.clone(),
            timeout: config.render_timeout(),
            verbose: config.verbose_logging,
            borderless: config.borderless,
        }
    }

    /// 覆盖超时时间
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// 单个任务对应的参数（不含固定前缀参数）
    pub fn job_args(&self, job: &NametagJob) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--name".into(),
            job.name.clone().into(),
            "--team".into(),
            job.team.clone().into(),
            "--image".into(),
            job.image_path.clone().into(),
            "--quote".into(),
            job.quote.clone().into(),
            "--output".into(),
            job.output_path.clone().into(),
        ];

        if let Some(username) = &job.username {
            args.push("--username".into());
            args.push(username.clone().into());
        }
        if self.borderless {
            args.push("--borderless".into());
        }
        if self.verbose {
            args.push("--verbose".into());
        }

        args
    }

    /// 运行生成进程
    pub async fn run(&self, job: &NametagJob) -> Result<(), RenderError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.base_args)
            .args(self.job_args(job))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }

        debug!("执行生成命令: {:?}", cmd.as_std());

        let child = cmd.spawn().map_err(|source| RenderError::SpawnFailed {
            program: self.program.clone(),
            source,
        })?;

        // 超时后 future 被丢弃，kill_on_drop 负责结束子进程
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| RenderError::TimedOut {
                program: self.program.clone(),
                timeout: self.timeout,
            })?
            .map_err(|source| RenderError::WaitFailed {
                program: self.program.clone(),
                source,
            })?;

        if !output.stdout.is_empty() {
            debug!(
                "生成器输出: {}",
                tail_text(&String::from_utf8_lossy(&output.stdout), STDERR_TAIL_CHARS)
            );
        }

        if output.status.success() {
            Ok(())
        } else {
            Err(RenderError::NonZeroExit {
                program: self.program.clone(),
                code: output.status.code(),
                stderr: tail_text(
                    String::from_utf8_lossy(&output.stderr).trim(),
                    STDERR_TAIL_CHARS,
                ),
            })
        }
    }
}

impl NametagRenderer for CommandRenderer {
    async fn render(&self, job: &NametagJob) -> bool {
        match self.run(job).await {
            Ok(()) => true,
            Err(e) => {
                error!("  ❌ 生成器执行失败: {}", e);
                false
            }
        }
    }
}
