use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 铭牌生成进程错误
    #[error("渲染错误: {0}")]
    Render(#[from] RenderError),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件读取失败
    #[error("读取配置文件失败 ({}): {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({}): {source}", path.display())]
    TomlParseFailed {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: &'static str,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {}", path.display())]
    NotFound { path: PathBuf },
    /// 默认头像不存在
    #[error("默认图片不存在: {}", path.display())]
    DefaultImageNotFound { path: PathBuf },
    /// 创建目录失败
    #[error("创建目录失败 ({}): {source}", path.display())]
    CreateDirFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({}): {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// CSV 读取失败
    #[error("CSV读取失败 ({}): {source}", path.display())]
    CsvReadFailed { path: PathBuf, source: csv::Error },
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 客户端初始化失败
    #[error("HTTP客户端初始化失败: {source}")]
    ClientInitFailed { source: reqwest::Error },
    /// 网络请求失败（包括超时）
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        source: reqwest::Error,
    },
    /// 非 2xx 响应
    #[error("API返回错误状态 ({endpoint}): {status}")]
    BadStatus { endpoint: String, status: u16 },
    /// JSON 解析失败
    #[error("JSON解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        source: serde_json::Error,
    },
    /// `data` 列表为空
    #[error("API返回空结果: {endpoint}")]
    EmptyResponse { endpoint: String },
    /// 结果中缺少字段
    #[error("API结果缺少字段 {field} ({endpoint})")]
    MissingField {
        endpoint: String,
        field: &'static str,
    },
    /// 下载内容不是 PNG
    #[error("下载的文件不是PNG图片: {url}")]
    NotPng { url: String },
}

/// 铭牌生成进程错误
#[derive(Debug, Error)]
pub enum RenderError {
    /// 进程启动失败
    #[error("无法启动 {program}: {source}")]
    SpawnFailed {
        program: String,
        source: std::io::Error,
    },
    /// 等待进程结束失败
    #[error("等待 {program} 结束失败: {source}")]
    WaitFailed {
        program: String,
        source: std::io::Error,
    },
    /// 进程超时被终止
    #[error("{program} 超时 ({timeout:?})，已终止")]
    TimedOut { program: String, timeout: Duration },
    /// 非零退出码
    #[error("{program} 退出码 {code:?}: {stderr}")]
    NonZeroExit {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

impl ApiError {
    /// 创建网络请求失败错误
    pub fn request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// 创建缺少字段错误
    pub fn missing_field(endpoint: impl Into<String>, field: &'static str) -> Self {
        ApiError::MissingField {
            endpoint: endpoint.into(),
            field,
        }
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
