use crate::error::{AppResult, ConfigError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 头像缓存目录，每个用户名一个 `<username>.png`
    pub avatars_dir: PathBuf,
    /// 铭牌 PDF 输出目录
    pub output_dir: PathBuf,
    /// 查不到头像时使用的默认图片
    pub default_image: PathBuf,
    // --- Roblox API 配置 ---
    pub users_api_url: String,
    pub thumbnails_api_url: String,
    /// 单个 HTTP 请求超时（秒）
    pub http_timeout_secs: u64,
    // --- 铭牌生成器配置 ---
    pub generator_program: String,
    pub generator_args: Vec<String>,
    /// 生成器工作目录，为空时继承当前目录
    pub generator_workdir: Option<PathBuf>,
    /// 单次生成超时（秒）
    pub render_timeout_secs: u64,
    /// 给生成器加 `--borderless`
    pub borderless: bool,
    /// 给生成器加 `--verbose`，同时打开 debug 日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            avatars_dir: PathBuf::from("avatars"),
            output_dir: PathBuf::from("output"),
            default_image: PathBuf::from("docs").join("Generic-Roblox-Character.png"),
            users_api_url: "https://users.roblox.com/v1/usernames/users".to_string(),
            thumbnails_api_url: "https://thumbnails.roblox.com/v1/users/avatar-headshot"
                .to_string(),
            http_timeout_secs: 30,
            generator_program: "dotnet".to_string(),
            generator_args: vec![
                "run".to_string(),
                "--project".to_string(),
                "jryan-nametag.csproj".to_string(),
                "--".to_string(),
            ],
            generator_workdir: None,
            render_timeout_secs: 60,
            borderless: false,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 默认配置 + 环境变量覆盖
    pub fn from_env() -> AppResult<Self> {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件加载配置，缺省字段取默认值，再应用环境变量覆盖
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content).map_err(|source| {
            ConfigError::TomlParseFailed {
                path: path.to_path_buf(),
                source,
            }
        })?;
        config.with_env_overrides()
    }

    fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 用 `NAMETAG_*` 环境变量覆盖各字段
    pub fn with_env_overrides(self) -> AppResult<Self> {
        Ok(Self {
            avatars_dir: env_var("NAMETAG_AVATARS_DIR")
                .map(PathBuf::from)
                .unwrap_or(self.avatars_dir),
            output_dir: env_var("NAMETAG_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(self.output_dir),
            default_image: env_var("NAMETAG_DEFAULT_IMAGE")
                .map(PathBuf::from)
                .unwrap_or(self.default_image),
            users_api_url: env_var("NAMETAG_USERS_API_URL").unwrap_or(self.users_api_url),
            thumbnails_api_url: env_var("NAMETAG_THUMBNAILS_API_URL")
                .unwrap_or(self.thumbnails_api_url),
            http_timeout_secs: parse_env("NAMETAG_HTTP_TIMEOUT_SECS", "u64")?
                .unwrap_or(self.http_timeout_secs),
            generator_program: env_var("NAMETAG_GENERATOR_PROGRAM")
                .unwrap_or(self.generator_program),
            generator_args: env_var("NAMETAG_GENERATOR_ARGS")
                .map(|v| v.split_whitespace().map(str::to_string).collect())
                .unwrap_or(self.generator_args),
            generator_workdir: env_var("NAMETAG_GENERATOR_WORKDIR")
                .map(PathBuf::from)
                .or(self.generator_workdir),
            render_timeout_secs: parse_env("NAMETAG_RENDER_TIMEOUT_SECS", "u64")?
                .unwrap_or(self.render_timeout_secs),
            borderless: parse_env("NAMETAG_BORDERLESS", "bool")?.unwrap_or(self.borderless),
            verbose_logging: parse_env("NAMETAG_VERBOSE", "bool")?
                .unwrap_or(self.verbose_logging),
        })
    }

    /// 将相对路径解析到 `base` 下
    ///
    /// 生成器可能在别的工作目录运行，传给它的路径必须是绝对路径
    pub fn absolutize(mut self, base: &Path) -> Self {
        for path in [
            &mut self.avatars_dir,
            &mut self.output_dir,
            &mut self.default_image,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout_secs)
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn parse_env<T: std::str::FromStr>(
    name: &str,
    expected_type: &'static str,
) -> AppResult<Option<T>> {
    match env_var(name) {
        None => Ok(None),
        Some(value) => match value.parse() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => Err(ConfigError::EnvVarParseFailed {
                var_name: name.to_string(),
                value,
                expected_type,
            }
            .into()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_roblox_endpoints() {
        let config = Config::default();
        assert_eq!(config.http_timeout_secs, 30);
        assert_eq!(config.render_timeout_secs, 60);
        assert!(config.users_api_url.ends_with("/v1/usernames/users"));
        assert_eq!(config.generator_program, "dotnet");
        assert_eq!(config.generator_args.last().map(String::as_str), Some("--"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            output_dir = "/tmp/tags"
            borderless = true
            generator_args = ["render.js"]
            "#,
        )
        .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("/tmp/tags"));
        assert!(config.borderless);
        assert_eq!(config.generator_args, vec!["render.js".to_string()]);
        // 未设置的字段保持默认
        assert_eq!(config.avatars_dir, PathBuf::from("avatars"));
        assert_eq!(config.render_timeout_secs, 60);
    }

    #[test]
    fn test_bad_toml_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nametag.toml");
        std::fs::write(&path, "http_timeout_secs = \"soon\"").unwrap();

        let err = Config::from_toml_file(&path).unwrap_err();
        assert!(err.to_string().contains("TOML解析失败"));
    }

    #[test]
    fn test_absolutize_only_touches_relative_paths() {
        let config = Config {
            output_dir: PathBuf::from("/srv/out"),
            ..Config::default()
        }
        .absolutize(Path::new("/work"));

        assert_eq!(config.output_dir, PathBuf::from("/srv/out"));
        assert_eq!(config.avatars_dir, PathBuf::from("/work/avatars"));
        assert_eq!(
            config.default_image,
            PathBuf::from("/work/docs/Generic-Roblox-Character.png")
        );
    }
}
